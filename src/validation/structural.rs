//! Recursive-descent validator for the built-in schema subset
//!
//! Supported keywords: `type`, `enum`, `required`, `properties`, `items`,
//! `minLength`, `maxLength`, `minimum` and `maximum`. Anything else in a schema
//! is ignored, and constraint values of the wrong shape are skipped rather than
//! rejected. The one exception is `type`: a declaration that names no known
//! type never matches.

use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

use super::error::{ErrorKind, ValidationError};
use super::numeric::{compare, deep_equal};
use super::types::{DeclaredType, TypeTag, kind_name, render_declared};

/// Path of the document root
pub const ROOT_PATH: &str = "$";

/// Nesting depth past which nodes are reported instead of validated
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Validate `value` against `schema` from the document root
pub fn validate(value: &Value, schema: &Value) -> Vec<ValidationError> {
    StructuralValidator::default().validate(value, schema, ROOT_PATH)
}

/// Validate `value` against `schema`, reporting paths under `path`
pub fn validate_at(value: &Value, schema: &Value, path: &str) -> Vec<ValidationError> {
    StructuralValidator::default().validate(value, schema, path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralValidator {
    max_depth: usize,
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Collect every finding for `value`, in keyword order, with nested findings
    /// spliced in where `properties` and `items` are checked.
    pub fn validate(&self, value: &Value, schema: &Value, path: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.validate_node(value, schema, path, 0, &mut errors);
        errors
    }

    fn validate_node(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
        depth: usize,
        errors: &mut Vec<ValidationError>,
    ) {
        if depth > self.max_depth {
            errors.push(ValidationError::new(
                path,
                ErrorKind::DepthExceeded,
                format!("maximum nesting depth {} exceeded", self.max_depth),
            ));
            return;
        }

        let Value::Object(schema) = schema else {
            return;
        };

        let declared = schema.get("type").map(DeclaredType::from_value);
        if let (Some(declared), Some(raw)) = (&declared, schema.get("type")) {
            if !declared.matches(value) {
                errors.push(ValidationError::new(
                    path,
                    ErrorKind::TypeMismatch,
                    format!(
                        "expected type {}, got {}",
                        render_declared(raw),
                        kind_name(value)
                    ),
                ));
                return;
            }
        }

        check_enum(value, schema, path, errors);

        if let Value::Object(object) = value {
            if declared
                .as_ref()
                .is_some_and(|declared| declared.admits(TypeTag::Object))
            {
                check_required(object, schema, path, errors);
            }
            if let Some(Value::Object(properties)) = schema.get("properties") {
                for (key, subschema) in properties {
                    if let Some(child) = object.get(key) {
                        let child_path = format!("{path}.{key}");
                        self.validate_node(child, subschema, &child_path, depth + 1, errors);
                    }
                }
            }
        }

        if let (Value::Array(elements), Some(items)) = (value, schema.get("items")) {
            for (index, element) in elements.iter().enumerate() {
                let child_path = format!("{path}[{index}]");
                self.validate_node(element, items, &child_path, depth + 1, errors);
            }
        }

        match value {
            Value::String(text) => check_length(text, schema, path, errors),
            Value::Number(number) => check_range(number, schema, path, errors),
            _ => {}
        }
    }
}

fn check_enum(
    value: &Value,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(Value::Array(options)) = schema.get("enum") else {
        return;
    };
    if !options.iter().any(|option| deep_equal(value, option)) {
        errors.push(ValidationError::new(
            path,
            ErrorKind::EnumViolation,
            format!("value {value} not in enum {}", Value::Array(options.clone())),
        ));
    }
}

fn check_required(
    object: &Map<String, Value>,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(Value::Array(required)) = schema.get("required") else {
        return;
    };
    for name in required.iter().filter_map(Value::as_str) {
        if !object.contains_key(name) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::MissingRequiredProperty,
                format!("missing required property '{name}'"),
            ));
        }
    }
}

fn check_length(
    text: &str,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let length = text.chars().count();
    let observed = Number::from(length as u64);

    if let Some(Value::Number(bound)) = schema.get("minLength") {
        if compare(&observed, bound) == Some(Ordering::Less) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::LengthOutOfRange,
                format!("string length {length} < minLength {bound}"),
            ));
        }
    }
    if let Some(Value::Number(bound)) = schema.get("maxLength") {
        if compare(&observed, bound) == Some(Ordering::Greater) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::LengthOutOfRange,
                format!("string length {length} > maxLength {bound}"),
            ));
        }
    }
}

fn check_range(
    number: &Number,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(Value::Number(bound)) = schema.get("minimum") {
        if compare(number, bound) == Some(Ordering::Less) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::ValueOutOfRange,
                format!("{number} < minimum {bound}"),
            ));
        }
    }
    if let Some(Value::Number(bound)) = schema.get("maximum") {
        if compare(number, bound) == Some(Ordering::Greater) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::ValueOutOfRange,
                format!("{number} > maximum {bound}"),
            ));
        }
    }
}
