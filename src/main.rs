use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use schemacheck::config::{Overrides, Settings};
use schemacheck::validation::{BackendKind, ROOT_PATH};

mod commands;

use commands::{OutputFormat, check_command, validate_command};

#[derive(Parser)]
#[command(
    name = "schemacheck",
    about = "Validate JSON and YAML sample data against lightweight JSON schemas",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root that schema and data directories are resolved against
    #[arg(short = 'C', long, global = true, env = "SCHEMACHECK_ROOT")]
    root: Option<PathBuf>,

    /// Config file, relative to the root (defaults to <root>/schemacheck.yml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing *.schema.json files
    #[arg(long, global = true, env = "SCHEMACHECK_SCHEMAS_DIR")]
    schemas_dir: Option<PathBuf>,

    /// Directory containing the sample data files
    #[arg(long, global = true, env = "SCHEMACHECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Validator backend
    #[arg(long, value_enum, global = true, env = "SCHEMACHECK_BACKEND")]
    backend: Option<BackendKind>,

    /// Maximum nesting depth validated by the built-in backend
    #[arg(long, global = true, env = "SCHEMACHECK_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show individual errors and log progress (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every sample data file against its matching schema (default command)
    Check,

    /// Validate a single document against a single schema
    Validate {
        /// Data document (JSON, or YAML by extension)
        data: PathBuf,

        /// Schema document
        #[arg(short, long)]
        schema: PathBuf,

        /// Root path used to label errors
        #[arg(long, default_value = ROOT_PATH)]
        path: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let settings = Settings::resolve(&Overrides {
        root: cli.root,
        config: cli.config,
        schemas_dir: cli.schemas_dir,
        data_dir: cli.data_dir,
        backend: cli.backend,
        max_depth: cli.max_depth,
    })?;
    tracing::debug!("Resolved settings: {settings:?}");

    match cli.command {
        Some(Commands::Validate { data, schema, path }) => {
            validate_command(&settings, &data, &schema, &path, cli.format)
        }
        Some(Commands::Check) | None => check_command(&settings, cli.format, cli.verbose > 0),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("SCHEMACHECK_LOG").unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("schemacheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("schemacheck=info"), // -v: info messages
        _ => EnvFilter::new("schemacheck=debug"), // -vv or more: full debug
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
