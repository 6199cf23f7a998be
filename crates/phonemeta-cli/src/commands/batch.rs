//! Manifest-driven generation

use anyhow::{Context, Result};
use colored::Colorize;
use phonemeta_core::{BatchReport, Generator, Manifest};
use std::path::Path;

/// Label used in usage messages for manifest entries.
const COMMAND_LABEL: &str = "batch";

/// Run every artifact of the manifest at `manifest_path`.
///
/// # Errors
///
/// Returns the first failure; artifacts generated before it are kept.
pub fn execute(generator: &Generator, manifest_path: &Path, quiet: bool) -> Result<BatchReport> {
    let manifest = Manifest::load(manifest_path)?;
    tracing::debug!(
        manifest = %manifest_path.display(),
        artifacts = manifest.artifacts.len(),
        "loaded manifest"
    );

    let report = manifest
        .run(generator, COMMAND_LABEL)
        .with_context(|| format!("Batch {} failed", manifest_path.display()))?;

    if !quiet {
        for path in report.artifacts.iter().chain(report.module.iter()) {
            println!("{} {}", "Generated".green(), path.display());
        }
    }
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use phonemeta_core::Config;
    use tempfile::TempDir;

    #[test]
    fn test_missing_manifest_is_config_error() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::from_config(&Config::default());

        let err = execute(&generator, &dir.path().join("absent.toml"), true).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<phonemeta_core::Error>(),
            Some(phonemeta_core::Error::Config(_))
        ));
    }

    #[test]
    fn test_execute_reports_written_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("short.bin"), [0x01]).unwrap();
        let manifest = dir.path().join("phonemeta.toml");
        std::fs::write(
            &manifest,
            "output_dir = \"gen\"\n[[artifact]]\ninput = \"short.bin\"\nbasename = \"short_numbers\"\nconst_name = \"SHORT_NUMBERS\"\n",
        )
        .unwrap();
        let generator = Generator::from_config(&Config::default());

        let report = execute(&generator, &manifest, true).unwrap();

        assert_eq!(report.artifacts, vec![dir.path().join("gen").join("short_numbers.rs")]);
        assert_eq!(report.module, Some(dir.path().join("gen").join("mod.rs")));
    }
}
