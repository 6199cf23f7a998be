//! Entry point for the `phonemeta` binary.

use std::process::ExitCode;

use colored::Colorize;
use phonemeta_cli::error::category_from_error;

fn main() -> ExitCode {
    match phonemeta_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let category = category_from_error(&err);
            tracing::debug!(%category, "command failed");
            eprintln!("{} {err:#}", "error:".red().bold());
            category.as_exit_code()
        },
    }
}
