//! High-level validation API for PlayScript projects
//!
//! # C4 Architecture Annotations
//! @c4-component Validator
//! @c4-container Validation Core
//! @c4-description Orchestrates the syntax stage and the cross-file stage over a target
//! @c4-uses DocumentWalker "Enumerates documents"
//! @c4-uses SyntaxValidator "Stage 1"
//! @c4-uses ReferenceResolver "Stage 2"

use glob::Pattern;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use super::references::resolve_document;
use super::symbols::SymbolTable;
use super::syntax::validate_document;
use super::types::ValidationResult;
use crate::document::{Document, DOCUMENT_EXTENSION};
use crate::loader;
use crate::workspace::DocumentWalker;

/// Which stages report their diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Syntax checks followed by reference resolution
    #[default]
    Full,
    /// Syntax checks only
    SyntaxOnly,
    /// Reference resolution only; syntax checks still run to fill the
    /// symbol table but their diagnostics are dropped
    CrossFileOnly,
}

impl ValidationMode {
    pub fn from_flags(syntax_only: bool, cross_file_only: bool) -> Self {
        match (syntax_only, cross_file_only) {
            (true, _) => ValidationMode::SyntaxOnly,
            (false, true) => ValidationMode::CrossFileOnly,
            (false, false) => ValidationMode::Full,
        }
    }

    pub fn reports_syntax(&self) -> bool {
        !matches!(self, ValidationMode::CrossFileOnly)
    }

    pub fn resolves_references(&self) -> bool {
        !matches!(self, ValidationMode::SyntaxOnly)
    }
}

/// Configuration for a validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Project root; targets are resolved against it
    pub root: PathBuf,
    /// File or directory to validate; the whole root when absent
    pub target: Option<PathBuf>,
    pub mode: ValidationMode,
    /// Document extension, without the dot
    pub extension: String,
    /// Paths (relative to the root) skipped during discovery
    pub ignore: Vec<Pattern>,
}

impl ValidatorConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            target: None,
            mode: ValidationMode::Full,
            extension: DOCUMENT_EXTENSION.to_string(),
            ignore: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_ignore(mut self, ignore: Vec<Pattern>) -> Self {
        self.ignore = ignore;
        self
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files_validated: usize,
    pub schemas: usize,
    pub actions: usize,
    pub integrations: usize,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub result: ValidationResult,
    pub symbols: SymbolTable,
    pub summary: Summary,
}

impl ValidationReport {
    /// Warnings never fail a run
    pub fn is_success(&self) -> bool {
        !self.result.has_errors()
    }
}

pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> ValidationReport {
        let mut result = ValidationResult::new();
        let walker = DocumentWalker::new(&self.config.root, &self.config.extension)
            .with_ignore(self.config.ignore.clone());
        let paths = walker.resolve(self.config.target.as_deref(), &mut result);

        // The table is always built, whether or not syntax diagnostics are shown
        let mut syntax = ValidationResult::new();
        let mut symbols = SymbolTable::new();
        let documents = load_all(&paths, &mut symbols, &mut syntax);
        if self.config.mode.reports_syntax() {
            result.extend(syntax);
        }

        if self.config.mode.resolves_references() {
            for document in documents.values() {
                resolve_document(document, &symbols, &mut result);
            }
        }

        let summary = Summary {
            files_validated: documents.len(),
            schemas: symbols.schema_count(),
            actions: symbols.action_count(),
            integrations: symbols.integration_count(),
        };
        ValidationReport { result, symbols, summary }
    }
}

/// Syntax stage: load every path in order and check it on its own
fn load_all(
    paths: &[PathBuf],
    symbols: &mut SymbolTable,
    result: &mut ValidationResult,
) -> IndexMap<PathBuf, Document> {
    let mut documents = IndexMap::new();
    for path in paths {
        if let Some(document) = loader::load(path, result) {
            validate_document(&document, symbols, result);
            documents.insert(path.clone(), document);
        }
    }
    documents
}

/// Validate a project in one call
pub fn validate_project(config: ValidatorConfig) -> ValidationReport {
    Validator::new(config).run()
}
