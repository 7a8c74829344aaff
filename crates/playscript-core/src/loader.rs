//! Turning files into documents
//!
//! The loader reads one file, hands its text to `serde_yml`, and checks that
//! the result is a mapping. It never touches the symbol table.

use serde_yml::Value;
use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::errors::LoadError;
use crate::validation::{Diagnostic, DiagnosticCategory, ValidationResult};

/// Read and parse a document from disk
pub fn read_document(path: &Path) -> Result<Document, LoadError> {
    let source = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    parse_document(path, source)
}

/// Parse already-read content as a document
pub fn parse_document(path: &Path, source: String) -> Result<Document, LoadError> {
    let mut value: Value = serde_yml::from_str(&source)
        .map_err(|source| LoadError::Syntax { path: path.to_path_buf(), source })?;
    // `<<: *anchor` keys are folded into the mapping that holds them
    value
        .apply_merge()
        .map_err(|source| LoadError::Syntax { path: path.to_path_buf(), source })?;

    match value {
        Value::Mapping(fields) => Ok(Document::new(path, source, fields)),
        _ => Err(LoadError::InvalidFormat { path: path.to_path_buf() }),
    }
}

/// Load a document, recording why when it cannot be used
///
/// Documents without a `type` are still returned: they count as seen, but the
/// caller must skip typed validation for them.
pub fn load(path: &Path, result: &mut ValidationResult) -> Option<Document> {
    match read_document(path) {
        Ok(document) => {
            if document.kind.is_none() {
                result.push(
                    Diagnostic::error(
                        DiagnosticCategory::MissingType,
                        "Missing required 'type' field",
                    )
                    .with_file(document.display_path()),
                );
            }
            Some(document)
        }
        Err(error) => {
            result.push(error.into_diagnostic());
            None
        }
    }
}
