mod check;
mod validate;

pub use check::check_command;
pub use validate::validate_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable JSON on stdout
    Json,
}
