use anyhow::Result;
use colored::Colorize;
use miette::Report;
use schemacheck::config::Settings;
use schemacheck::loader::FileScanner;
use schemacheck::runner::{BatchReport, BatchRunner, Outcome};
use schemacheck::validation::{BackendKind, for_kind};

use super::OutputFormat;

pub fn check_command(
    settings: &Settings,
    format: OutputFormat,
    show_errors: bool,
) -> Result<bool> {
    let pairs = FileScanner::discover(&settings.schemas_dir, &settings.data_dir)?;

    let validator = for_kind(settings.backend, settings.max_depth);
    let mut report = BatchRunner::new(validator.as_ref()).run(&pairs);

    // Parse diagnostics go to stderr regardless of the output format
    for file in &mut report.files {
        if let Some(diagnostic) = file.diagnostic.take() {
            eprintln!("{:?}", Report::new(diagnostic));
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, settings.backend, show_errors),
    }

    Ok(report.success())
}

fn print_report(report: &BatchReport, backend: BackendKind, show_errors: bool) {
    println!("\n=== Schema Validation ===\n");

    match backend {
        BackendKind::Builtin => println!("Using built-in structural validator\n"),
        BackendKind::Jsonschema => println!("Using jsonschema engine\n"),
    }

    for file in &report.files {
        match &file.outcome {
            Outcome::Passed => {
                println!("{} {} ({} records)", "[PASS]".green(), file.entity, file.records);
            }
            Outcome::Failed => {
                println!(
                    "{} {} - {} error(s)",
                    "[FAIL]".red(),
                    file.entity,
                    file.errors.len()
                );
                if show_errors {
                    for error in &file.errors {
                        println!("  [ERR] {error}");
                    }
                }
            }
            Outcome::Skipped => {
                println!("{} No sample data for {}", "[SKIP]".yellow(), file.entity);
            }
            Outcome::Errored { reason } => {
                println!("{} {} - {reason}", "[ERROR]".red().bold(), file.entity);
            }
        }
    }

    println!(
        "\n{} files validated, {} total error(s)\n",
        report.validated, report.total_errors
    );
}
