//! Structural validation of JSON values against a restricted schema subset

mod backend;
mod error;
mod numeric;
mod structural;
mod types;


pub use backend::{BackendKind, JsonSchemaBackend, Validator, for_kind, pointer_to_path};
pub use error::{BackendError, ErrorKind, ValidationError};
pub use numeric::{compare, deep_equal};
pub use structural::{DEFAULT_MAX_DEPTH, ROOT_PATH, StructuralValidator, validate, validate_at};
pub use types::{TypeTag, kind_name};
