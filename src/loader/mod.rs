//! Discovery and parsing of schema and data documents

mod document;
mod file_scanner;

pub use document::{DocumentError, Format, load_document, parse_document};
pub use file_scanner::{DATA_EXTENSIONS, FileScanner, SCHEMA_SUFFIX, SchemaPair};
