//! Single-document structural checks
//!
//! # C4 Architecture Annotations
//! @c4-component SyntaxValidator
//! @c4-container Validation Core
//! @c4-description Checks required fields, container shapes and enumerations per document kind
//! @c4-responsibility Populate the symbol table with every declared name

use serde_yml::Value;

use super::rule_id::DiagnosticCategory;
use super::symbols::SymbolTable;
use super::types::{Diagnostic, ValidationResult};
use crate::document::{describe, is_present, scalar_text, Document, DocumentKind};

pub const ACTION_IMPLEMENTATIONS: &[&str] =
    &["create_record", "integration_call", "python", "api_call"];

pub const FIELD_TYPES: &[&str] = &[
    "string",
    "email",
    "datetime",
    "integer",
    "decimal",
    "boolean",
    "textarea",
    "picklist.excl",
    "picklist.multi",
];

pub const PICKLIST_PREFIX: &str = "picklist";

pub const COMPONENT_TYPES: &[&str] = &["field_section", "related_list", "custom_component"];

pub const TRIGGER_TYPES: &[&str] = &["database_event", "schedule", "webhook", "manual"];

/// Whether a value is a string listed in `allowed`
fn is_one_of(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().map_or(false, |s| allowed.contains(&s))
}

/// Runs the checks of one document and records the names it declares
pub struct SyntaxValidator<'a> {
    document: &'a Document,
    symbols: &'a mut SymbolTable,
    result: &'a mut ValidationResult,
    file: String,
}

impl<'a> SyntaxValidator<'a> {
    pub fn new(
        document: &'a Document,
        symbols: &'a mut SymbolTable,
        result: &'a mut ValidationResult,
    ) -> Self {
        let file = document.display_path();
        Self { document, symbols, result, file }
    }

    /// Dispatch on the document kind. Documents without a kind are skipped;
    /// the loader has already reported them.
    pub fn validate(&mut self) {
        let Some(kind) = self.document.kind.clone() else {
            return;
        };

        if let DocumentKind::Unknown(tag) = &kind {
            self.push(Diagnostic::warning(
                DiagnosticCategory::UnknownType,
                format!("Unknown type: {tag}"),
            ));
            return;
        }

        self.check_required(kind.required_fields());

        match kind {
            DocumentKind::Action => self.validate_action(),
            DocumentKind::Schema => self.validate_schema(),
            DocumentKind::Layout => self.validate_layout(),
            DocumentKind::Automation => self.validate_automation(),
            DocumentKind::Integration => self.validate_integration(),
            DocumentKind::Form => self.validate_form(),
            DocumentKind::Unknown(_) => {}
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.result.push(diagnostic.with_file(&self.file));
    }

    fn error(&mut self, category: DiagnosticCategory, message: String) {
        self.push(Diagnostic::error(category, message));
    }

    /// Error located on the line of a top-level key
    fn error_at(&mut self, key: &str, category: DiagnosticCategory, message: String) {
        let line = self.document.key_line(key);
        self.push(Diagnostic::error(category, message).with_optional_line(line));
    }

    fn check_required(&mut self, fields: &[&str]) {
        for field in fields {
            if !self.document.contains(field) {
                self.error(
                    DiagnosticCategory::MissingRequiredField,
                    format!("Missing required field: {field}"),
                );
            }
        }
    }

    fn validate_action(&mut self) {
        if let Some(name) = self.document.get_text("name") {
            self.symbols.declare_action(name);
        }

        if let Some(implementation) = self.document.get_present("implementation") {
            if !is_one_of(implementation, ACTION_IMPLEMENTATIONS) {
                let message = format!(
                    "Invalid implementation: {}. Must be one of: {}",
                    describe(implementation),
                    ACTION_IMPLEMENTATIONS.join(", ")
                );
                self.error_at("implementation", DiagnosticCategory::InvalidImplementation, message);
            }
        }

        for key in ["input_schema", "output_schema"] {
            if self.document.get(key).map_or(false, |value| !value.is_mapping()) {
                self.error_at(
                    key,
                    DiagnosticCategory::InvalidSchema,
                    format!("{key} must be an object"),
                );
            }
        }

        if let Some(tags) = self.document.get_present("tags") {
            if !tags.is_sequence() {
                let message = "tags must be a list".to_string();
                self.error_at("tags", DiagnosticCategory::InvalidTags, message);
            }
        }
    }

    fn validate_schema(&mut self) {
        let object = self.document.get_text("object");
        if let Some(object) = &object {
            self.symbols.declare_schema(object.clone());
        }

        let Some(fields) = self.document.get("fields") else {
            return;
        };
        let Some(fields) = fields.as_sequence() else {
            let message = "fields must be a list".to_string();
            self.error_at("fields", DiagnosticCategory::InvalidFields, message);
            return;
        };

        let mut seen: Vec<String> = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            if !field.is_mapping() {
                let message = format!("Field {index} must be an object");
                self.error(DiagnosticCategory::InvalidField, message);
                continue;
            }

            let Some(name) = field.get("name").filter(|v| is_present(v)).map(describe) else {
                let message = format!("Field {index} missing 'name'");
                self.error(DiagnosticCategory::MissingFieldName, message);
                continue;
            };

            if seen.contains(&name) {
                let message = format!("Duplicate field name: {name}");
                self.error(DiagnosticCategory::DuplicateField, message);
            } else {
                seen.push(name.clone());
            }

            if let Some(object) = &object {
                self.symbols.declare_field(object, name.clone());
            }

            let Some(field_type) = field.get("type").filter(|v| is_present(v)) else {
                continue;
            };

            if !is_one_of(field_type, FIELD_TYPES) {
                self.push(Diagnostic::warning(
                    DiagnosticCategory::UnknownFieldType,
                    format!("Unknown field type: {}", describe(field_type)),
                ));
            }

            let is_picklist =
                field_type.as_str().map_or(false, |t| t.starts_with(PICKLIST_PREFIX));
            if is_picklist && field.get("values").is_none() {
                self.error(
                    DiagnosticCategory::MissingPicklistValues,
                    format!("Picklist field {name} missing 'values'"),
                );
            }
        }
    }

    fn validate_layout(&mut self) {
        let Some(components) = self.document.get("components") else {
            return;
        };
        let Some(components) = components.as_sequence() else {
            self.error_at(
                "components",
                DiagnosticCategory::InvalidComponents,
                "components must be a list".into(),
            );
            return;
        };

        for (index, component) in components.iter().enumerate() {
            if !component.is_mapping() {
                self.error(
                    DiagnosticCategory::InvalidComponent,
                    format!("Component {index} must be an object"),
                );
                continue;
            }

            if let Some(component_type) = component.get("type").filter(|v| is_present(v)) {
                if !is_one_of(component_type, COMPONENT_TYPES) {
                    self.error(
                        DiagnosticCategory::InvalidComponentType,
                        format!("Invalid component type: {}", describe(component_type)),
                    );
                }
            }
        }
    }

    fn validate_automation(&mut self) {
        if let Some(trigger) = self.document.get("trigger").filter(|v| v.is_mapping()) {
            if let Some(trigger_type) = trigger.get("type").filter(|v| is_present(v)) {
                if !is_one_of(trigger_type, TRIGGER_TYPES) {
                    let message = format!("Invalid trigger type: {}", describe(trigger_type));
                    self.error_at("trigger", DiagnosticCategory::InvalidTriggerType, message);
                }
            }
        }

        if let Some(action) = self.document.get("action").filter(|v| v.is_mapping()) {
            if action.get("ref").is_none() {
                self.error_at(
                    "action",
                    DiagnosticCategory::MissingActionRef,
                    "Action must have 'ref' field".into(),
                );
            }
        }
    }

    fn validate_integration(&mut self) {
        if let Some(name) = self.document.get_text("name") {
            self.symbols.declare_integration(name);
        }
    }

    fn validate_form(&mut self) {
        if self.document.get("fields").map_or(false, |fields| !fields.is_sequence()) {
            let message = "fields must be a list".to_string();
            self.error_at("fields", DiagnosticCategory::InvalidFields, message);
        }
    }
}

/// Check one document, recording diagnostics and declared names
pub fn validate_document(
    document: &Document,
    symbols: &mut SymbolTable,
    result: &mut ValidationResult,
) {
    SyntaxValidator::new(document, symbols, result).validate();
}

/// Text of the `name` key of a mapping entry, if any
pub(crate) fn entry_name(entry: &Value) -> Option<String> {
    entry.get("name").filter(|v| is_present(v)).and_then(scalar_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;
    use crate::validation::symbols::FieldResolution;
    use std::path::Path;
    use test_case::test_case;

    fn check(source: &str) -> (ValidationResult, SymbolTable) {
        let document = parse_document(Path::new("doc.ps"), source.to_string()).unwrap();
        let mut symbols = SymbolTable::new();
        let mut result = ValidationResult::new();
        validate_document(&document, &mut symbols, &mut result);
        (result, symbols)
    }

    fn categories(result: &ValidationResult) -> Vec<DiagnosticCategory> {
        result.iter().map(|d| d.category).collect()
    }

    #[test]
    fn test_valid_action_has_no_issues() {
        let (result, symbols) = check(
            r#"
type: action
name: contact.create
description: Create a contact
implementation: create_record
tags: [crm, contact]
input_schema:
  email: {}
output_schema:
  id: {}
"#,
        );
        assert!(result.is_empty(), "unexpected: {:?}", result);
        assert!(symbols.has_action("contact.create"));
    }

    #[test]
    fn test_action_missing_description_and_implementation() {
        let (result, symbols) = check("type: action\nname: test.invalid\nenabled: true\n");
        assert_eq!(
            categories(&result),
            vec![DiagnosticCategory::MissingRequiredField, DiagnosticCategory::MissingRequiredField]
        );
        assert_eq!(result.errors[0].message, "Missing required field: description");
        assert_eq!(result.errors[1].message, "Missing required field: implementation");
        assert!(symbols.has_action("test.invalid"), "name is registered despite errors");
    }

    #[test]
    fn test_action_rule_violations() {
        let (result, _) = check(
            r#"
type: action
name: ai.chat
description: Chat
implementation: llm
tags: ai
input_schema: [message]
output_schema: plain
"#,
        );
        assert_eq!(
            categories(&result),
            vec![
                DiagnosticCategory::InvalidImplementation,
                DiagnosticCategory::InvalidSchema,
                DiagnosticCategory::InvalidSchema,
                DiagnosticCategory::InvalidTags,
            ]
        );
        assert_eq!(
            result.errors[0].message,
            "Invalid implementation: llm. Must be one of: create_record, integration_call, python, api_call"
        );
        assert_eq!(result.errors[0].line, Some(5));
        assert_eq!(result.errors[1].message, "input_schema must be an object");
        assert_eq!(result.errors[2].message, "output_schema must be an object");
    }

    #[test]
    fn test_schema_registers_object_and_fields() {
        let (result, symbols) = check(
            r#"
type: schema
object: test_object
description: A test schema
fields:
  - name: id
    type: string
  - name: status
    type: picklist.excl
    values: [active, inactive]
"#,
        );
        assert!(result.is_empty(), "unexpected: {:?}", result);
        assert!(symbols.has_schema("test_object"));
        assert_eq!(symbols.resolve_field("test_object", "status"), FieldResolution::Found);
    }

    #[test]
    fn test_schema_field_problems() {
        let (result, symbols) = check(
            r#"
type: schema
object: contact
description: Contacts
fields:
  - name: email
    type: email
  - just a string
  - type: string
  - name: email
    type: money
  - name: stage
    type: picklist.multi
"#,
        );
        assert_eq!(
            result.errors.iter().map(|d| d.category).collect::<Vec<_>>(),
            vec![
                DiagnosticCategory::InvalidField,
                DiagnosticCategory::MissingFieldName,
                DiagnosticCategory::DuplicateField,
                DiagnosticCategory::MissingPicklistValues,
            ]
        );
        assert_eq!(result.errors[0].message, "Field 1 must be an object");
        assert_eq!(result.errors[1].message, "Field 2 missing 'name'");
        assert_eq!(result.errors[2].message, "Duplicate field name: email");
        assert_eq!(result.errors[3].message, "Picklist field stage missing 'values'");

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].category, DiagnosticCategory::UnknownFieldType);
        assert_eq!(result.warnings[0].message, "Unknown field type: money");

        let fields = symbols.schema_fields("contact").unwrap();
        assert_eq!(fields.iter().map(String::as_str).collect::<Vec<_>>(), vec!["email", "stage"]);
    }

    #[test]
    fn test_each_repetition_is_reported() {
        let (result, symbols) = check(
            "type: schema\nobject: a\ndescription: d\nfields:\n  - name: x\n  - name: x\n  - name: x\n",
        );
        assert_eq!(result.count_of(DiagnosticCategory::DuplicateField), 2);
        assert_eq!(symbols.schema_fields("a").map(|f| f.len()), Some(1));
    }

    #[test_case("fields: contact" ; "scalar")]
    #[test_case("fields:\n  email: {}" ; "mapping")]
    #[test_case("fields:" ; "null")]
    fn test_schema_fields_must_be_a_list(fields: &str) {
        let (result, symbols) =
            check(&format!("type: schema\nobject: contact\ndescription: d\n{fields}\n"));
        assert_eq!(categories(&result), vec![DiagnosticCategory::InvalidFields]);
        assert_eq!(result.errors[0].line, Some(4));
        assert!(symbols.has_schema("contact"));
    }

    #[test]
    fn test_layout_components() {
        let (result, _) = check(
            r#"
type: layout
name: contact
components:
  - type: field_section
    fields: [email]
  - related
  - type: chart
"#,
        );
        assert_eq!(
            categories(&result),
            vec![DiagnosticCategory::InvalidComponent, DiagnosticCategory::InvalidComponentType]
        );
        assert_eq!(result.errors[0].message, "Component 1 must be an object");
        assert_eq!(result.errors[1].message, "Invalid component type: chart");
    }

    #[test]
    fn test_layout_components_must_be_a_list() {
        let (result, _) = check("type: layout\nname: contact\ncomponents: everything\n");
        assert_eq!(categories(&result), vec![DiagnosticCategory::InvalidComponents]);
    }

    #[test_case("database_event", &[] ; "database event")]
    #[test_case("schedule", &[] ; "schedule")]
    #[test_case("webhook", &[] ; "webhook")]
    #[test_case("manual", &[] ; "manual")]
    #[test_case("email_received", &[DiagnosticCategory::InvalidTriggerType] ; "unsupported")]
    fn test_automation_trigger_types(trigger: &str, expected: &[DiagnosticCategory]) {
        let (result, _) = check(&format!(
            "type: automation\nname: a\ndescription: d\ntrigger:\n  type: {trigger}\naction:\n  ref: x\n"
        ));
        assert_eq!(categories(&result), expected);
    }

    #[test]
    fn test_automation_action_needs_ref() {
        let (result, _) = check(
            "type: automation\nname: a\ndescription: d\ntrigger:\n  type: manual\naction:\n  with: {}\n",
        );
        assert_eq!(categories(&result), vec![DiagnosticCategory::MissingActionRef]);
        assert_eq!(result.errors[0].line, Some(6));
    }

    #[test]
    fn test_integration_registers_name() {
        let (result, symbols) =
            check("type: integration\nname: sendgrid\nservice: email\ndescription: Mail\n");
        assert!(result.is_empty());
        assert!(symbols.has_integration("sendgrid"));
    }

    #[test]
    fn test_form_fields_must_be_a_list() {
        let (result, _) = check(
            "type: form\nname: signup\ntitle: Sign up\ntarget_object: contact\nfields: email\n",
        );
        assert_eq!(categories(&result), vec![DiagnosticCategory::InvalidFields]);
    }

    #[test]
    fn test_unknown_type_is_single_warning() {
        let (result, symbols) = check("type: report\nname: weekly\n");
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].category, DiagnosticCategory::UnknownType);
        assert_eq!(result.warnings[0].message, "Unknown type: report");
        assert_eq!(symbols.action_count(), 0);
    }

    #[test]
    fn test_untyped_document_is_skipped() {
        let (result, _) = check("name: orphan\n");
        assert!(result.is_empty());
    }
}
