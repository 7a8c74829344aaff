use serde::Serialize;
use std::fmt;
use strum::{AsRefStr, Display};

use super::rule_id::DiagnosticCategory;

/// Severity level for diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single reported issue
///
/// Diagnostics are plain data: once built they are only ever appended to a
/// [`ValidationResult`], never edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: DiagnosticCategory,
    pub message: String,
    pub file: String,
    /// 1-based, best effort
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic { severity, category, message: message.into(), file: String::new(), line: None }
    }

    // Builder methods
    pub fn error(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    pub fn warning(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub fn with_file(mut self, file: impl AsRef<str>) -> Self {
        self.file = file.as_ref().to_string();
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_optional_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} at {}:{}", self.severity, self.file, line)?,
            None => write!(f, "{} at {}", self.severity, self.file)?,
        }
        write!(f, "\n\t{}[{}]: {}", self.severity, self.category, self.message)
    }
}

/// Append-only collector shared by every stage of a validation run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, routed by its severity
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Move every diagnostic of `other` to the end of this collector
    pub fn extend(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Errors first, then warnings, each in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn count_of(&self, category: DiagnosticCategory) -> usize {
        self.iter().filter(|d| d.category == category).count()
    }
}
