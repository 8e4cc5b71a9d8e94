//! File scanning utilities for discovering schema/data pairs

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix that marks a schema file; the rest of the file name is the entity
pub const SCHEMA_SUFFIX: &str = ".schema.json";

/// Data file extensions, in lookup order
pub const DATA_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// A discovered schema and the data file that shares its entity name, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaPair {
    pub entity: String,
    pub schema_path: PathBuf,
    pub data_path: Option<PathBuf>,
}

pub struct FileScanner;

impl FileScanner {
    /// Entity name of a schema file (`student.schema.json` -> `student`)
    pub fn entity_name(path: &Path) -> Option<&str> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(SCHEMA_SUFFIX))
            .filter(|entity| !entity.is_empty())
    }

    /// Scan a directory for schema files (non-recursive), sorted by file name
    pub fn scan_schemas(schemas_dir: &Path) -> Result<Vec<PathBuf>> {
        // globwalk cannot strip a `./`-style base from the paths it yields
        let base = std::fs::canonicalize(schemas_dir)
            .with_context(|| format!("Failed to resolve {}", schemas_dir.display()))?;
        let pattern = format!("*{SCHEMA_SUFFIX}");
        let walker = globwalk::GlobWalkerBuilder::from_patterns(&base, &[pattern.as_str()])
            .max_depth(1)
            .build()
            .with_context(|| format!("Failed to scan {}", schemas_dir.display()))?;

        let mut schemas: Vec<PathBuf> = walker
            .filter_map(Result::ok)
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && Self::entity_name(path).is_some())
            .collect();
        schemas.sort();

        debug!(
            "Found {} schema file(s) in {}",
            schemas.len(),
            schemas_dir.display()
        );
        Ok(schemas)
    }

    /// Locate the data file for an entity, trying each known extension in turn
    pub fn find_data_file(data_dir: &Path, entity: &str) -> Option<PathBuf> {
        DATA_EXTENSIONS
            .iter()
            .map(|ext| data_dir.join(format!("{entity}.{ext}")))
            .find(|candidate| candidate.is_file())
    }

    /// Pair every schema in `schemas_dir` with its data file in `data_dir`
    pub fn discover(schemas_dir: &Path, data_dir: &Path) -> Result<Vec<SchemaPair>> {
        if !schemas_dir.is_dir() {
            anyhow::bail!("Schemas directory not found: {}", schemas_dir.display());
        }
        if !data_dir.is_dir() {
            anyhow::bail!("Data directory not found: {}", data_dir.display());
        }

        let pairs = Self::scan_schemas(schemas_dir)?
            .into_iter()
            .filter_map(|schema_path| {
                let entity = Self::entity_name(&schema_path)?.to_string();
                let data_path = Self::find_data_file(data_dir, &entity);
                Some(SchemaPair {
                    entity,
                    schema_path,
                    data_path,
                })
            })
            .collect();

        Ok(pairs)
    }
}
