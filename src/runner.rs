//! Batch validation of every discovered schema/data pair

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::loader::{DocumentError, SchemaPair, load_document};
use crate::validation::{ValidationError, Validator};

/// Result status of one schema/data pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    /// No data file exists for the schema
    Skipped,
    /// A document could not be read or parsed, or the backend rejected the schema
    Errored { reason: String },
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub entity: String,
    pub schema_path: PathBuf,
    pub data_path: Option<PathBuf>,
    pub records: usize,
    pub errors: Vec<ValidationError>,
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Source-annotated parse failure, rendered by the caller
    #[serde(skip)]
    pub diagnostic: Option<DocumentError>,
}

impl FileReport {
    fn new(pair: &SchemaPair, outcome: Outcome) -> Self {
        Self {
            entity: pair.entity.clone(),
            schema_path: pair.schema_path.clone(),
            data_path: pair.data_path.clone(),
            records: 0,
            errors: Vec::new(),
            outcome,
            diagnostic: None,
        }
    }

    /// Findings attributed to this file; an errored file counts as one
    pub fn error_count(&self) -> usize {
        match self.outcome {
            Outcome::Errored { .. } => 1,
            _ => self.errors.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub backend: &'static str,
    pub files: Vec<FileReport>,
    /// Number of files that were not skipped
    pub validated: usize,
    pub total_errors: usize,
}

impl BatchReport {
    pub fn success(&self) -> bool {
        self.files
            .iter()
            .all(|file| matches!(file.outcome, Outcome::Passed | Outcome::Skipped))
    }
}

/// Wrap a non-array document as a single record
pub fn records_of(data: Value) -> Vec<Value> {
    match data {
        Value::Array(records) => records,
        single => vec![single],
    }
}

pub struct BatchRunner<'a> {
    validator: &'a dyn Validator,
}

impl<'a> BatchRunner<'a> {
    pub fn new(validator: &'a dyn Validator) -> Self {
        Self { validator }
    }

    pub fn run(&self, pairs: &[SchemaPair]) -> BatchReport {
        let files: Vec<FileReport> = pairs.iter().map(|pair| self.run_pair(pair)).collect();

        let validated = files
            .iter()
            .filter(|file| file.outcome != Outcome::Skipped)
            .count();
        let total_errors: usize = files.iter().map(FileReport::error_count).sum();

        info!(
            "Validated {validated} file(s) with the {} backend, {total_errors} total error(s)",
            self.validator.name()
        );

        BatchReport {
            backend: self.validator.name(),
            files,
            validated,
            total_errors,
        }
    }

    pub fn run_pair(&self, pair: &SchemaPair) -> FileReport {
        let Some(data_path) = &pair.data_path else {
            debug!("No data file for {}, skipping", pair.entity);
            return FileReport::new(pair, Outcome::Skipped);
        };

        let loaded = load_document(&pair.schema_path)
            .and_then(|schema| Ok((schema, load_document(data_path)?)));
        let (schema, data) = match loaded {
            Ok(documents) => documents,
            Err(err) => {
                warn!("Could not load {}: {}", pair.entity, err.reason());
                let mut report = FileReport::new(
                    pair,
                    Outcome::Errored {
                        reason: err.to_string(),
                    },
                );
                report.diagnostic = Some(err);
                return report;
            }
        };

        let records = records_of(data);
        debug!("Validating {} record(s) for {}", records.len(), pair.entity);

        let errors = match self.validator.check_records(&records, &schema, &pair.entity) {
            Ok(errors) => errors,
            Err(err) => {
                warn!("Backend {} failed on {}: {err}", self.validator.name(), pair.entity);
                let mut report = FileReport::new(
                    pair,
                    Outcome::Errored {
                        reason: err.to_string(),
                    },
                );
                report.records = records.len();
                return report;
            }
        };

        let outcome = if errors.is_empty() {
            Outcome::Passed
        } else {
            Outcome::Failed
        };
        let mut report = FileReport::new(pair, outcome);
        report.records = records.len();
        report.errors = errors;
        report
    }
}
