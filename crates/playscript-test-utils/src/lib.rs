pub mod assertions;
pub mod builders;

pub use builders::{ProjectBuilder, TestProject};

// Re-export common types for convenience
pub use playscript_core::{
    DiagnosticCategory, Severity, ValidationMode, ValidationReport, ValidationResult,
};
