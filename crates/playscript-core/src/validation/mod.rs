//! Two-phase validation of PlayScript documents
//!
//! # C4 Architecture Annotations
//! @c4-container Validation Core
//! @c4-description Syntax checks per document, then cross-document reference resolution
//! @c4-technology Rust (playscript-core)

pub mod references;
pub mod rule_id;
pub mod symbols;
pub mod syntax;
pub mod types;
pub mod validator;

pub use references::ReferenceResolver;
pub use rule_id::DiagnosticCategory;
pub use symbols::{FieldResolution, SymbolTable};
pub use syntax::SyntaxValidator;
pub use types::{Diagnostic, Severity, ValidationResult};
pub use validator::{
    validate_project, Summary, ValidationMode, ValidationReport, Validator, ValidatorConfig,
};
