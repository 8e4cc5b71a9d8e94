//! Validation findings and backend failures

use serde::Serialize;
use thiserror::Error;

/// Category of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TypeMismatch,
    EnumViolation,
    MissingRequiredProperty,
    LengthOutOfRange,
    ValueOutOfRange,
    DepthExceeded,
    /// Reported by the full JSON Schema engine for keywords outside the built-in subset
    Schema,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::EnumViolation => "enum_violation",
            ErrorKind::MissingRequiredProperty => "missing_required_property",
            ErrorKind::LengthOutOfRange => "length_out_of_range",
            ErrorKind::ValueOutOfRange => "value_out_of_range",
            ErrorKind::DepthExceeded => "depth_exceeded",
            ErrorKind::Schema => "schema",
        }
    }
}

/// A single data-quality finding, located by its path from the document root
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Failure of a validator backend to run at all (as opposed to a finding)
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("schema could not be compiled: {0}")]
    InvalidSchema(String),
}
