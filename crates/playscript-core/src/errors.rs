//! Error types for document loading

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::{Diagnostic, DiagnosticCategory};

/// Reasons a file cannot become a [`crate::Document`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read as UTF-8 text
    #[error("Error reading file: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed YAML
    #[error("YAML syntax error: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    /// The top-level value is a list, a scalar or null
    #[error("File must contain a YAML object")]
    InvalidFormat { path: PathBuf },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Syntax { path, .. }
            | LoadError::InvalidFormat { path } => path,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            LoadError::Io { .. } => DiagnosticCategory::FileError,
            LoadError::Syntax { .. } => DiagnosticCategory::YamlSyntax,
            LoadError::InvalidFormat { .. } => DiagnosticCategory::InvalidFormat,
        }
    }

    /// Line reported by the YAML parser, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Syntax { source, .. } => source.location().map(|location| location.line()),
            _ => None,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.category(), self.to_string())
            .with_file(self.path().display().to_string())
            .with_optional_line(self.line())
    }
}
