//! phonemeta CLI - phone number metadata compiler
//!
//! This is the library behind the `phonemeta` binary. Command
//! implementations are organized in separate modules; this file wires the
//! parsed arguments, configuration and logging together.
use anyhow::{Context, Result};
use clap::Parser;
use phonemeta_core::{Config, Generator};

mod cli;
mod commands;
pub mod error;
mod utils;

use crate::utils::initialize_logging;
use cli::{Cli, Commands};

/// Execute the phonemeta CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging or configuration cannot be initialized, or if
/// the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli).map_err(error::CliError::internal)?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(converter = ?config.converter, "configuration resolved");

    execute_command(cli, &config)
}

fn execute_command(cli: Cli, config: &Config) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Build { args } => {
            let generator = Generator::from_config(config);
            commands::build_artifact(&generator, &args, quiet)?;
        },
        Commands::Aggregate {
            output_dir,
            entries,
        } => {
            let generator = Generator::from_config(config);
            commands::aggregate_modules(&generator, &output_dir, &entries, quiet)?;
        },
        Commands::Batch { manifest } => {
            let generator = Generator::from_config(config);
            commands::run_batch(&generator, &manifest, quiet)?;
        },
        Commands::Types => {
            commands::list_types(&mut std::io::stdout().lock())?;
        },
    }
    Ok(())
}
