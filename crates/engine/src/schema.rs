use serde::Deserialize;
use serde_json::Value;

/// Structured report data keyed by field name.
///
/// serde_json is built with `preserve_order`, so insertion order
/// survives serialization.
pub type ReportData = serde_json::Map<String, Value>;

/// Category of one report field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Free text (also the default for missing/unrecognized types)
    #[default]
    String,

    /// Numeric value
    Number,

    /// Ordered list of values
    Array,

    /// Nested object, optionally with its own field schema
    Object,
}

impl FieldKind {
    /// Parse a schema "type" string; anything unrecognized is treated as string
    pub fn from_type_str(raw: &str) -> Self {
        match raw {
            "string" => Self::String,
            "number" => Self::Number,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => Self::String,
        }
    }

    /// Schema "type" string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Only the array/non-array split matters for defaulting
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array)
    }
}

/// Schema entry describing one report field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDescriptor {
    /// Field category
    pub kind: FieldKind,

    /// Human-readable description embedded in the prompt
    pub description: String,

    /// Nested field schema for "object" fields.
    /// Repair treats the object as a whole unit; nested fields are
    /// never defaulted individually.
    pub properties: Option<Vec<(String, FieldDescriptor)>>,
}

impl FieldDescriptor {
    /// Create descriptor with kind and description
    pub fn new(kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            properties: None,
        }
    }

    /// Build a descriptor from raw JSON, tolerating malformed entries.
    /// A missing or unrecognized "type" is treated as string.
    pub fn from_value(value: &Value) -> Self {
        let entry = value.as_object();

        let kind = entry
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .map(FieldKind::from_type_str)
            .unwrap_or_default();

        let description = entry
            .and_then(|e| e.get("description"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let properties = entry
            .and_then(|e| e.get("properties"))
            .filter(|p| p.is_object())
            .map(parse_fields);

        Self {
            kind,
            description,
            properties,
        }
    }
}

/// Caller-supplied report template: an ordered field-name → descriptor mapping.
///
/// Accepts the wire format `{"fields": {name: {"type": ..., "description": ...}}}`.
/// An empty or missing "fields" key yields the degenerate empty template.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct ReportTemplate {
    /// Declared fields in caller order
    pub fields: Vec<(String, FieldDescriptor)>,
}

impl From<Value> for ReportTemplate {
    fn from(value: Value) -> Self {
        let fields = value.get("fields").map(parse_fields).unwrap_or_default();
        Self { fields }
    }
}

/// Parse a name → descriptor JSON object, preserving order
fn parse_fields(value: &Value) -> Vec<(String, FieldDescriptor)> {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(name, raw)| (name.clone(), FieldDescriptor::from_value(raw)))
                .collect()
        })
        .unwrap_or_default()
}

impl ReportTemplate {
    /// Create empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    /// Render the declared fields as canonical pretty-printed JSON
    /// for embedding into the extraction prompt
    pub fn render_fields(&self) -> String {
        serde_json::to_string_pretty(&fields_to_value(&self.fields))
            .unwrap_or_else(|_| "{}".to_string())
    }
}

fn fields_to_value(fields: &[(String, FieldDescriptor)]) -> Value {
    let mut map = ReportData::new();
    for (name, descriptor) in fields {
        map.insert(name.clone(), descriptor_to_value(descriptor));
    }
    Value::Object(map)
}

fn descriptor_to_value(descriptor: &FieldDescriptor) -> Value {
    let mut entry = ReportData::new();
    entry.insert(
        "type".to_string(),
        Value::String(descriptor.kind.as_str().to_string()),
    );
    entry.insert(
        "description".to_string(),
        Value::String(descriptor.description.clone()),
    );
    if let Some(properties) = &descriptor.properties {
        entry.insert("properties".to_string(), fields_to_value(properties));
    }
    Value::Object(entry)
}
