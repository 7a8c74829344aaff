//! Project-wide registry of declared names
//!
//! Filled by the syntax stage, then only borrowed immutably while references
//! are resolved. Ordered collections keep reports stable between runs.

use indexmap::{IndexMap, IndexSet};

/// Outcome of looking up `object.field`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldResolution {
    Found,
    /// The object is declared but does not list the field
    MissingField,
    /// No schema declares the object, so nothing can be said about the field
    UnknownObject,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    schema_objects: IndexSet<String>,
    schema_fields: IndexMap<String, IndexSet<String>>,
    action_names: IndexSet<String>,
    integration_names: IndexSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a schema object with an empty field set
    ///
    /// Declaring the same object again replaces the fields gathered so far.
    pub fn declare_schema(&mut self, object: impl Into<String>) {
        let object = object.into();
        self.schema_fields.insert(object.clone(), IndexSet::new());
        self.schema_objects.insert(object);
    }

    /// Record a field of a declared object; returns false if it was already there
    pub fn declare_field(&mut self, object: &str, field: impl Into<String>) -> bool {
        self.schema_fields.entry(object.to_string()).or_default().insert(field.into())
    }

    pub fn declare_action(&mut self, name: impl Into<String>) {
        self.action_names.insert(name.into());
    }

    pub fn declare_integration(&mut self, name: impl Into<String>) {
        self.integration_names.insert(name.into());
    }

    pub fn has_schema(&self, object: &str) -> bool {
        self.schema_objects.contains(object)
    }

    pub fn schema_fields(&self, object: &str) -> Option<&IndexSet<String>> {
        self.schema_fields.get(object)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.action_names.contains(name)
    }

    pub fn has_integration(&self, name: &str) -> bool {
        self.integration_names.contains(name)
    }

    pub fn resolve_field(&self, object: &str, field: &str) -> FieldResolution {
        match self.schema_fields.get(object) {
            None => FieldResolution::UnknownObject,
            Some(fields) if fields.contains(field) => FieldResolution::Found,
            Some(_) => FieldResolution::MissingField,
        }
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.action_names.iter().map(String::as_str)
    }

    pub fn schema_count(&self) -> usize {
        self.schema_objects.len()
    }

    pub fn action_count(&self) -> usize {
        self.action_names.len()
    }

    pub fn integration_count(&self) -> usize {
        self.integration_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_resolution() {
        let mut table = SymbolTable::new();
        table.declare_schema("contact");
        table.declare_field("contact", "email");

        assert_eq!(table.resolve_field("contact", "email"), FieldResolution::Found);
        assert_eq!(table.resolve_field("contact", "phone"), FieldResolution::MissingField);
        assert_eq!(table.resolve_field("account", "email"), FieldResolution::UnknownObject);
    }

    #[test]
    fn test_declared_object_without_fields_still_resolves() {
        let mut table = SymbolTable::new();
        table.declare_schema("empty");
        assert!(table.has_schema("empty"));
        assert_eq!(table.resolve_field("empty", "anything"), FieldResolution::MissingField);
    }

    #[test]
    fn test_field_insert_is_idempotent() {
        let mut table = SymbolTable::new();
        table.declare_schema("contact");
        assert!(table.declare_field("contact", "email"));
        assert!(!table.declare_field("contact", "email"));
        assert_eq!(table.schema_fields("contact").map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_redeclared_schema_replaces_fields() {
        let mut table = SymbolTable::new();
        table.declare_schema("contact");
        table.declare_field("contact", "email");
        table.declare_schema("contact");
        table.declare_field("contact", "phone");

        assert_eq!(table.schema_count(), 1);
        assert_eq!(table.resolve_field("contact", "email"), FieldResolution::MissingField);
        assert_eq!(table.resolve_field("contact", "phone"), FieldResolution::Found);
    }

    #[test]
    fn test_duplicate_names_do_not_inflate_counts() {
        let mut table = SymbolTable::new();
        table.declare_action("send.email");
        table.declare_action("send.email");
        table.declare_integration("sendgrid");
        assert_eq!(table.action_count(), 1);
        assert_eq!(table.integration_count(), 1);
        assert_eq!(table.action_names().collect::<Vec<_>>(), vec!["send.email"]);
    }
}
