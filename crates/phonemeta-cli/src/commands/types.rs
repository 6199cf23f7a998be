//! Listing of the known metadata types

use anyhow::Result;
use colored::Colorize;
use phonemeta_core::{MetadataType, Variant};
use std::io::Write;

/// Print every metadata type with its basenames and copyright years.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn execute(out: &mut dyn Write) -> Result<()> {
    for ty in MetadataType::values() {
        writeln!(
            out,
            "{} ({}-{})",
            ty.name().bold(),
            ty.copyright_year(),
            ty.copyright_second_year()
        )?;
        for variant in Variant::ALL {
            writeln!(out, "  {:<5} {}", variant.to_string(), variant.basename(*ty))?;
        }
    }
    Ok(())
}
