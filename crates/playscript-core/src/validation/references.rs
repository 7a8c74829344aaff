//! Cross-document reference resolution
//!
//! # C4 Architecture Annotations
//! @c4-component ReferenceResolver
//! @c4-container Validation Core
//! @c4-description Resolves action, schema, field and integration references
//! @c4-uses SymbolTable "Read-only lookups"

use serde_yml::Value;

use super::rule_id::DiagnosticCategory;
use super::symbols::{FieldResolution, SymbolTable};
use super::syntax::entry_name;
use super::types::{Diagnostic, Severity, ValidationResult};
use crate::document::{is_present, scalar_text, Document, DocumentKind};

pub struct ReferenceResolver<'a> {
    symbols: &'a SymbolTable,
    result: &'a mut ValidationResult,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(symbols: &'a SymbolTable, result: &'a mut ValidationResult) -> Self {
        Self { symbols, result }
    }

    pub fn resolve(&mut self, document: &Document) {
        let file = document.display_path();
        match &document.kind {
            Some(DocumentKind::Automation) => self.resolve_automation(document, &file),
            Some(DocumentKind::Layout) => self.resolve_layout(document, &file),
            Some(DocumentKind::Form) => self.resolve_form(document, &file),
            Some(DocumentKind::Action)
                if document.get_str("implementation") == Some("integration_call") =>
            {
                self.resolve_integration(document, &file)
            }
            _ => {}
        }
    }

    fn report(
        &mut self,
        severity: Severity,
        category: DiagnosticCategory,
        file: &str,
        message: String,
    ) {
        self.result.push(Diagnostic::new(severity, category, message).with_file(file));
    }

    fn resolve_automation(&mut self, document: &Document, file: &str) {
        let Some(reference) = document
            .get("action")
            .and_then(|action| action.get("ref"))
            .filter(|v| is_present(v))
            .and_then(scalar_text)
        else {
            return;
        };

        if !self.symbols.has_action(&reference) {
            self.report(
                Severity::Error,
                DiagnosticCategory::MissingActionReference,
                file,
                format!("Action not found: {reference}"),
            );
        }
    }

    fn resolve_layout(&mut self, document: &Document, file: &str) {
        let layout_name = document.get_text("name");

        if let Some(name) = &layout_name {
            if !self.symbols.has_schema(name) {
                self.report(
                    Severity::Warning,
                    DiagnosticCategory::MissingSchemaReference,
                    file,
                    format!("Schema not found for layout: {name}"),
                );
            }
        }

        let components = document.get("components").and_then(Value::as_sequence);
        for component in components.into_iter().flatten().filter(|c| c.is_mapping()) {
            let fields = component.get("fields").and_then(Value::as_sequence);
            for field in fields.into_iter().flatten() {
                let reference = match field {
                    Value::String(name) => Some(name.clone()),
                    Value::Mapping(_) => entry_name(field),
                    _ => None,
                };
                if let Some(reference) = reference {
                    self.resolve_field_reference(file, layout_name.as_deref(), &reference);
                }
            }
        }
    }

    /// `object.field` resolves against `object`; a bare name against the
    /// enclosing object. Unknown objects are accepted silently.
    fn resolve_field_reference(&mut self, file: &str, enclosing: Option<&str>, reference: &str) {
        let (object, field) = match reference.split_once('.') {
            Some((object, field)) => (object, field),
            None => match enclosing {
                Some(object) => (object, reference),
                None => return,
            },
        };

        if self.symbols.resolve_field(object, field) == FieldResolution::MissingField {
            self.report(
                Severity::Error,
                DiagnosticCategory::MissingFieldReference,
                file,
                format!("Field not found: {object}.{field}"),
            );
        }
    }

    fn resolve_form(&mut self, document: &Document, file: &str) {
        if let Some(target) = document.get_text("target_object") {
            if !self.symbols.has_schema(&target) {
                self.report(
                    Severity::Error,
                    DiagnosticCategory::MissingSchemaReference,
                    file,
                    format!("Target object not found: {target}"),
                );
            }
        }

        let fields = document.get("fields").and_then(Value::as_sequence);
        for field in fields.into_iter().flatten() {
            let Some(maps_to) = field.get("maps_to").and_then(Value::as_str) else {
                continue;
            };
            // Only qualified mappings are checked
            if maps_to.contains('.') {
                self.resolve_field_reference(file, None, maps_to);
            }
        }
    }

    fn resolve_integration(&mut self, document: &Document, file: &str) {
        let Some(integration) = document
            .get("defaults")
            .and_then(|defaults| defaults.get("integration"))
            .filter(|v| is_present(v))
            .and_then(scalar_text)
        else {
            return;
        };

        if !self.symbols.has_integration(&integration) {
            self.report(
                Severity::Error,
                DiagnosticCategory::MissingIntegrationReference,
                file,
                format!("Integration not found: {integration}"),
            );
        }
    }
}

/// Resolve the references of one document against a complete symbol table
pub fn resolve_document(document: &Document, symbols: &SymbolTable, result: &mut ValidationResult) {
    ReferenceResolver::new(symbols, result).resolve(document);
}
