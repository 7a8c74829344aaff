//! Type-safe identification of diagnostic categories
//!
//! Every diagnostic carries one of these categories. They render as the
//! snake_case tags used in reports and in the JSON output.

use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticCategory {
    // Loading
    FileNotFound,
    FileError,
    YamlSyntax,
    InvalidFormat,
    MissingType,
    UnknownType,

    // Shared
    MissingRequiredField,

    // Actions
    InvalidImplementation,
    InvalidSchema,
    InvalidTags,

    // Schemas and forms
    InvalidFields,
    InvalidField,
    MissingFieldName,
    DuplicateField,
    UnknownFieldType,
    MissingPicklistValues,

    // Layouts
    InvalidComponents,
    InvalidComponent,
    InvalidComponentType,

    // Automations
    InvalidTriggerType,
    MissingActionRef,

    // Cross-document references
    MissingActionReference,
    MissingSchemaReference,
    MissingFieldReference,
    MissingIntegrationReference,
}

impl DiagnosticCategory {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Get a human-readable description of what the category reports
    pub const fn description(&self) -> &'static str {
        use DiagnosticCategory::*;
        match self {
            FileNotFound => "The requested target is neither a document nor a directory",
            FileError => "The file could not be read",
            YamlSyntax => "The file is not well-formed YAML",
            InvalidFormat => "The top-level value of the file is not a mapping",
            MissingType => "The document has no 'type' discriminator",
            UnknownType => "The document type is not one of the known kinds",
            MissingRequiredField => "A field required by the document kind is absent",
            InvalidImplementation => "The action implementation is not a supported one",
            InvalidSchema => "An action input or output schema is not a mapping",
            InvalidTags => "Action tags are not a list",
            InvalidFields => "The 'fields' entry is not a list",
            InvalidField => "A schema field entry is not a mapping",
            MissingFieldName => "A schema field entry has no name",
            DuplicateField => "A schema declares the same field name twice",
            UnknownFieldType => "A schema field uses a type outside the known set",
            MissingPicklistValues => "A picklist field does not declare its values",
            InvalidComponents => "The layout 'components' entry is not a list",
            InvalidComponent => "A layout component is not a mapping",
            InvalidComponentType => "A layout component type is not supported",
            InvalidTriggerType => "An automation trigger type is not supported",
            MissingActionRef => "An automation action has no 'ref'",
            MissingActionReference => "An automation refers to an action nobody declares",
            MissingSchemaReference => "A layout or form refers to an undeclared schema object",
            MissingFieldReference => "A reference names a field its schema does not declare",
            MissingIntegrationReference => "An action refers to an undeclared integration",
        }
    }
}

impl Serialize for DiagnosticCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_display() {
        assert_eq!(DiagnosticCategory::YamlSyntax.to_string(), "yaml_syntax");
        assert_eq!(
            DiagnosticCategory::MissingRequiredField.as_str(),
            "missing_required_field"
        );
        assert_eq!(
            DiagnosticCategory::MissingIntegrationReference.as_ref(),
            "missing_integration_reference"
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            DiagnosticCategory::from_str("duplicate_field").unwrap(),
            DiagnosticCategory::DuplicateField
        );
        assert!(DiagnosticCategory::from_str("not_a_category").is_err());
    }

    #[test]
    fn test_every_category_is_described() {
        for category in DiagnosticCategory::iter() {
            assert!(!category.description().is_empty(), "{category} has no description");
        }
    }
}
