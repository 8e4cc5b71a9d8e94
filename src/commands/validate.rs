use anyhow::{Context, Result};
use miette::Report;
use schemacheck::config::Settings;
use schemacheck::loader::{DocumentError, load_document};
use schemacheck::validation::for_kind;
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

use super::OutputFormat;

pub fn validate_command(
    settings: &Settings,
    data_path: &Path,
    schema_path: &Path,
    root_path: &str,
    format: OutputFormat,
) -> Result<bool> {
    let schema = load(schema_path)?;
    let data = load(data_path)?;

    let validator = for_kind(settings.backend, settings.max_depth);
    let errors = validator
        .check(&data, &schema, root_path)
        .with_context(|| format!("Failed to validate {}", data_path.display()))?;
    info!(
        "Validated {} with the {} backend",
        data_path.display(),
        validator.name()
    );

    match format {
        OutputFormat::Json => {
            let output = json!({"valid": errors.is_empty(), "errors": errors});
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text if errors.is_empty() => {
            println!("{}: valid", data_path.display());
        }
        OutputFormat::Text => {
            for error in &errors {
                println!("{error}");
            }
            println!("\n{}: {} error(s)", data_path.display(), errors.len());
        }
    }

    Ok(errors.is_empty())
}

fn load(path: &Path) -> Result<Value> {
    load_document(path).or_else(|err| match err {
        DocumentError::Parse { .. } => {
            eprintln!("{:?}", Report::new(err));
            anyhow::bail!("Failed to parse {} (see detailed error above)", path.display())
        }
        other => Err(other.into()),
    })
}
