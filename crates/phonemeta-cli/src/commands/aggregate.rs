//! Umbrella module generation

use anyhow::{Context, Result};
use colored::Colorize;
use phonemeta_core::{AggregateEntry, Generator};
use std::path::{Path, PathBuf};

/// Write the aggregate module for `entries` (`basename[:CONSTANT]`) into `output_dir`.
///
/// # Errors
///
/// Returns a usage error for a malformed entry and I/O errors from writing.
pub fn execute(
    generator: &Generator,
    output_dir: &Path,
    entries: &[String],
    quiet: bool,
) -> Result<PathBuf> {
    let entries = entries
        .iter()
        .map(|entry| AggregateEntry::parse(entry))
        .collect::<phonemeta_core::Result<Vec<_>>>()?;

    let path = generator
        .aggregate(output_dir, &entries)
        .with_context(|| format!("Failed to write {}", generator.module_file()))?;

    if !quiet {
        println!(
            "{} {} ({} modules)",
            "Generated".green(),
            path.display(),
            entries.len()
        );
    }
    Ok(path)
}
