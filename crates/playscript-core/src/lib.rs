//! Primitives for loading and validating PlayScript projects
//!
//! A project is a directory tree of `.ps` YAML documents. Validation runs in two
//! phases: every document is first checked on its own while the project-wide
//! [`validation::SymbolTable`] is filled, then every loaded document has its
//! references resolved against that table.

pub mod document;
pub mod errors;
pub mod loader;
pub mod validation;
pub mod workspace;

pub use document::{Document, DocumentKind, DOCUMENT_EXTENSION};
pub use validation::{
    validate_project, Diagnostic, DiagnosticCategory, Severity, Summary, SymbolTable,
    ValidationMode, ValidationReport, ValidationResult, Validator, ValidatorConfig,
};
