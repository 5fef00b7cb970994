//! Binary entrypoint for the `ghbatch` CLI.

use std::process::ExitCode;

use ghbatch::error::AppError;

fn main() -> ExitCode {
    // Recording is handled in commands::dispatch via GHBATCH_RECORD=<file>.
    match ghbatch::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(usage)) => {
            eprint!("{usage}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
