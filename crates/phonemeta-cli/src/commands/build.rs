//! Single artifact generation

use anyhow::{Context, Result};
use colored::Colorize;
use phonemeta_core::Generator;
use std::path::PathBuf;

/// Label occupying the ignored first slot of the invocation.
pub const COMMAND_LABEL: &str = "build";

/// Context added when the constant name was passed as a separate token.
const SPLIT_FLAG_HINT: &str =
    "--const-name takes its value in the same token: --const-name=<nameOfMetadataConstant>";

/// Generate one artifact from the raw `build` tokens.
///
/// The tokens are prefixed with the subcommand name so the option parser sees
/// exactly the 4- or 5-token invocation it expects.
///
/// # Errors
///
/// Returns the core error, with context, if parsing, loading or writing fails.
pub fn execute(generator: &Generator, args: &[String], quiet: bool) -> Result<PathBuf> {
    let invocation: Vec<&str> = std::iter::once(COMMAND_LABEL)
        .chain(args.iter().map(String::as_str))
        .collect();

    let result = generator.build(COMMAND_LABEL, &invocation);
    let path = if args.iter().any(|arg| arg == "--const-name") {
        result.context(SPLIT_FLAG_HINT)?
    } else {
        result.context("Failed to build metadata artifact")?
    };

    if !quiet {
        println!("{} {}", "Generated".green(), path.display());
    }
    Ok(path)
}
