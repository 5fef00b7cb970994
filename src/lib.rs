//! Core library entry for the `ghbatch` CLI.
//!
//! A batch is loaded from JSON or CSV, validated as a whole, and only then
//! executed one record at a time against the issue tracker.

pub mod adapters;
pub mod batch;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod load;
pub mod ports;
pub mod pull;
pub mod record;
pub mod validate;

use clap::Parser;

use crate::config::Config;
use crate::error::AppError;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and return `Ok`.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, or the command fails.
pub fn run<I, T>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(AppError::Usage(err.to_string())),
    };

    init_tracing(cli.verbose, cli.quiet);
    let config = Config::load_with_dotenv()?;
    commands::dispatch(&cli.command, &config)
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GHBATCH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Already initialised when `run` is called more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::error::AppError;

    #[test]
    fn help_is_not_an_error() {
        assert!(run(["ghbatch", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["ghbatch", "unknown"]);
        assert!(matches!(result, Err(AppError::Usage(_))));
    }

    #[test]
    fn run_errors_on_missing_input() {
        let result = run(["ghbatch", "validate", "--input", "/nonexistent/issues.json"]);
        assert!(matches!(result, Err(AppError::Load(_))));
    }
}
