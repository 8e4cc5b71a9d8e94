//! Pluggable validator backends, selected once at start-up

use jsonschema::error::ValidationErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::error::{BackendError, ErrorKind, ValidationError};
use super::structural::StructuralValidator;

/// Capability shared by the built-in validator and the full JSON Schema adapter
pub trait Validator: Send + Sync {
    /// Name of the backend (e.g., "builtin", "jsonschema")
    fn name(&self) -> &'static str;

    /// Validate one value, reporting paths under `path`
    fn check(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
    ) -> Result<Vec<ValidationError>, BackendError>;

    /// Validate every record of one data file, reporting paths as `{entity}[{i}]`
    fn check_records(
        &self,
        records: &[Value],
        schema: &Value,
        entity: &str,
    ) -> Result<Vec<ValidationError>, BackendError> {
        let mut errors = Vec::new();
        for (index, record) in records.iter().enumerate() {
            errors.extend(self.check(record, schema, &record_path(entity, index))?);
        }
        Ok(errors)
    }
}

fn record_path(entity: &str, index: usize) -> String {
    format!("{entity}[{index}]")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Built-in structural validator (restricted keyword subset)
    #[default]
    Builtin,
    /// Full JSON Schema engine
    Jsonschema,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Builtin => "builtin",
            BackendKind::Jsonschema => "jsonschema",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builtin" => Ok(BackendKind::Builtin),
            "jsonschema" => Ok(BackendKind::Jsonschema),
            _ => Err(format!(
                "Unknown backend '{s}'. Available backends: 'builtin', 'jsonschema'"
            )),
        }
    }
}

/// Get a validator implementation for the selected backend
pub fn for_kind(kind: BackendKind, max_depth: usize) -> Box<dyn Validator> {
    match kind {
        BackendKind::Builtin => Box::new(StructuralValidator::with_max_depth(max_depth)),
        BackendKind::Jsonschema => Box::new(JsonSchemaBackend),
    }
}

impl Validator for StructuralValidator {
    fn name(&self) -> &'static str {
        BackendKind::Builtin.as_str()
    }

    fn check(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
    ) -> Result<Vec<ValidationError>, BackendError> {
        Ok(self.validate(value, schema, path))
    }
}

/// Adapter over the `jsonschema` crate for schemas beyond the built-in subset
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaBackend;

impl Validator for JsonSchemaBackend {
    fn name(&self) -> &'static str {
        BackendKind::Jsonschema.as_str()
    }

    fn check(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
    ) -> Result<Vec<ValidationError>, BackendError> {
        let validator = compile(schema)?;
        Ok(collect_errors(&validator, value, path))
    }

    fn check_records(
        &self,
        records: &[Value],
        schema: &Value,
        entity: &str,
    ) -> Result<Vec<ValidationError>, BackendError> {
        // One compilation per schema, shared by every record
        let validator = compile(schema)?;
        Ok(records
            .iter()
            .enumerate()
            .flat_map(|(index, record)| {
                collect_errors(&validator, record, &record_path(entity, index))
            })
            .collect())
    }
}

fn compile(schema: &Value) -> Result<jsonschema::Validator, BackendError> {
    jsonschema::validator_for(schema).map_err(|e| BackendError::InvalidSchema(e.to_string()))
}

fn collect_errors(
    validator: &jsonschema::Validator,
    value: &Value,
    path: &str,
) -> Vec<ValidationError> {
    validator
        .iter_errors(value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            ValidationError::new(
                pointer_to_path(value, &pointer, path),
                map_kind(&error.kind),
                error.to_string(),
            )
        })
        .collect()
}

fn map_kind(kind: &ValidationErrorKind) -> ErrorKind {
    match kind {
        ValidationErrorKind::Type { .. } => ErrorKind::TypeMismatch,
        ValidationErrorKind::Enum { .. } => ErrorKind::EnumViolation,
        ValidationErrorKind::Required { .. } => ErrorKind::MissingRequiredProperty,
        ValidationErrorKind::MinLength { .. } | ValidationErrorKind::MaxLength { .. } => {
            ErrorKind::LengthOutOfRange
        }
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::Maximum { .. } => {
            ErrorKind::ValueOutOfRange
        }
        _ => ErrorKind::Schema,
    }
}

/// Convert a JSON Pointer into the `$.key[0]` path grammar.
///
/// Numeric segments become `[i]` only where the instance actually holds an array,
/// so object keys that look like numbers stay `.key`.
pub fn pointer_to_path(instance: &Value, pointer: &str, root: &str) -> String {
    let mut path = root.to_string();
    let mut current = Some(instance);

    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        match (current, segment.parse::<usize>()) {
            (Some(Value::Array(elements)), Ok(index)) => {
                path.push_str(&format!("[{index}]"));
                current = elements.get(index);
            }
            _ => {
                path.push('.');
                path.push_str(&segment);
                current = current.and_then(|node| node.get(segment.as_str()));
            }
        }
    }

    path
}
