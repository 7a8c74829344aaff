use serde_yml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of PlayScript documents
pub const DOCUMENT_EXTENSION: &str = "ps";

/// The closed set of document kinds, keyed by the `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Action,
    Schema,
    Layout,
    Automation,
    Integration,
    Form,
    /// Any other tag, kept verbatim so it can be reported
    Unknown(String),
}

impl DocumentKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "action" => DocumentKind::Action,
            "schema" => DocumentKind::Schema,
            "layout" => DocumentKind::Layout,
            "automation" => DocumentKind::Automation,
            "integration" => DocumentKind::Integration,
            "form" => DocumentKind::Form,
            other => DocumentKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocumentKind::Action => "action",
            DocumentKind::Schema => "schema",
            DocumentKind::Layout => "layout",
            DocumentKind::Automation => "automation",
            DocumentKind::Integration => "integration",
            DocumentKind::Form => "form",
            DocumentKind::Unknown(tag) => tag.as_str(),
        }
    }

    /// Top-level keys every document of this kind must carry, in check order
    pub const fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Action => &["name", "description", "implementation"],
            DocumentKind::Schema => &["object", "description", "fields"],
            DocumentKind::Layout => &["name", "components"],
            DocumentKind::Automation => &["name", "description", "trigger", "action"],
            DocumentKind::Integration => &["name", "service", "description"],
            DocumentKind::Form => &["name", "title", "target_object", "fields"],
            DocumentKind::Unknown(_) => &[],
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentKind::Unknown(_))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed source file
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    /// `None` when the document has no usable `type`
    pub kind: Option<DocumentKind>,
    pub source: String,
    pub fields: Mapping,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>, fields: Mapping) -> Self {
        let kind = fields.get("type").filter(|v| is_present(v)).map(|tag| match tag.as_str() {
            Some(tag) => DocumentKind::from_tag(tag),
            None => DocumentKind::Unknown(describe(tag)),
        });
        Document { path: path.into(), kind, source: source.into(), fields }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as it appears in diagnostics
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The value under `key` when it is set to something non-empty
    pub fn get_present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| is_present(v))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The scalar under `key` rendered as text, when it is set
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get_present(key).and_then(scalar_text)
    }

    /// Best-effort 1-based line of a top-level `key:` in the source
    pub fn key_line(&self, key: &str) -> Option<usize> {
        let prefix = format!("{key}:");
        self.source
            .lines()
            .position(|line| line.starts_with(&prefix))
            .map(|index| index + 1)
    }
}

/// Whether a YAML value counts as set: null, `false`, zero and empty
/// strings or collections do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_present(&tagged.value),
    }
}

/// Text of a scalar value; `None` for collections and null
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Render any value for use in a diagnostic message
pub fn describe(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| {
        serde_yml::to_string(value).map(|s| s.trim().to_string()).unwrap_or_default()
    })
}
