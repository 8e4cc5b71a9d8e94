//! Reading schema and data documents into JSON values

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Diagnostic)]
pub enum DocumentError {
    #[error("Failed to read {path}")]
    #[diagnostic(code(schemacheck::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(
        code(schemacheck::parse),
        help("Check the document syntax near the marked location")
    )]
    Parse {
        path: String,
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl DocumentError {
    /// Short single-line description, without the rendered source snippet
    pub fn reason(&self) -> String {
        match self {
            DocumentError::Read { source, .. } => source.to_string(),
            DocumentError::Parse { reason, .. } => reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// YAML for `.yaml`/`.yml`, JSON for everything else
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Read and parse a document, choosing the format from its extension
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_document(&content, Format::from_path(path), path)
}

pub fn parse_document(content: &str, format: Format, path: &Path) -> Result<Value, DocumentError> {
    let (reason, offset) = match format {
        Format::Json => match serde_json::from_str::<Value>(content) {
            Ok(value) => return Ok(value),
            Err(e) => {
                let offset = line_column_to_offset(content, e.line(), e.column());
                (e.to_string(), offset)
            }
        },
        Format::Yaml => match serde_yaml::from_str::<Value>(content) {
            Ok(value) => return Ok(value),
            Err(e) => {
                let offset = e.location().map(|l| l.index()).unwrap_or_default();
                (e.to_string(), offset)
            }
        },
    };

    let offset = floor_char_boundary(content, offset);
    let length = content[offset..].chars().next().map_or(0, char::len_utf8);
    Err(DocumentError::Parse {
        path: path.display().to_string(),
        reason,
        src: NamedSource::new(path.display().to_string(), content.to_string()),
        span: SourceSpan::new(offset.into(), length),
    })
}

/// Calculate the byte offset of a 1-based line and byte column, snapped to a char boundary
fn line_column_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();

    floor_char_boundary(source, line_start + column.saturating_sub(1))
}

/// Clamp `offset` into `source` and step back to the start of the char it falls in
fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
