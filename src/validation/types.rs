//! Primitive type tags and runtime shape matching

use serde_json::Value;

/// One of the primitive type names a schema may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl TypeTag {
    /// Look up a declared type name. Unknown names have no tag and never match.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(TypeTag::String),
            "number" => Some(TypeTag::Number),
            "integer" => Some(TypeTag::Integer),
            "boolean" => Some(TypeTag::Boolean),
            "array" => Some(TypeTag::Array),
            "object" => Some(TypeTag::Object),
            "null" => Some(TypeTag::Null),
            _ => None,
        }
    }

    /// Exact, non-coercive match. Booleans never satisfy `number` or `integer`.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::String, Value::String(_)) => true,
            (TypeTag::Number, Value::Number(_)) => true,
            (TypeTag::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (TypeTag::Boolean, Value::Bool(_)) => true,
            (TypeTag::Array, Value::Array(_)) => true,
            (TypeTag::Object, Value::Object(_)) => true,
            (TypeTag::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Name of the runtime shape of `value`, as used in type mismatch messages
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The normalized contents of a schema's `type` keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// One slot per declared entry; `None` for entries that name no known type
    tags: Vec<Option<TypeTag>>,
}

impl DeclaredType {
    /// A single string becomes one entry, a list keeps its entries, anything else
    /// becomes a single entry that never matches.
    pub fn from_value(declared: &Value) -> Self {
        let tags = match declared {
            Value::String(name) => vec![TypeTag::from_name(name)],
            Value::Array(names) => names
                .iter()
                .map(|name| name.as_str().and_then(TypeTag::from_name))
                .collect(),
            _ => vec![None],
        };
        Self { tags }
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.tags.iter().flatten().any(|tag| tag.matches(value))
    }

    pub fn admits(&self, tag: TypeTag) -> bool {
        self.tags.contains(&Some(tag))
    }
}

/// Render the declared `type` for messages: bare for a string, JSON otherwise
pub fn render_declared(declared: &Value) -> String {
    match declared {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    }
}
