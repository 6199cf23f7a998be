//! Configuration management for the metadata compiler.
//!
//! Configuration is stored in TOML format. Every section is optional and falls
//! back to defaults that reproduce the upstream libphonenumber build.
//!
//! ## Lookup Order
//!
//! 1. An explicit path (`--config` or `PHONEMETA_CONFIG`)
//! 2. `global.toml` in the platform config directory (see [`Config::default_path`])
//! 3. Built-in defaults
//!
//! ## Example Configuration File
//!
//! ```toml
//! [converter]
//! kind = "command"
//! program = "java"
//! args = ["-jar", "tools/BuildMetadataFromXml.jar", "{input}"]
//! lite_flag = "--lite-build"
//!
//! [banner]
//! original_holder = "The Libphonenumber Authors"
//! adaptation_holder = "Kashin Vladislav (Rust adaptation author)"
//!
//! [output]
//! extension = "rs"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How metadata documents are turned into bytes.
    pub converter: ConverterConfig,
    /// Holders named in the licensing banner.
    pub banner: BannerConfig,
    /// Naming of generated files.
    pub output: OutputConfig,
}

/// Which converter produces the serialized payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConverterConfig {
    /// The input already is the serialized payload.
    #[default]
    Raw,
    /// Run an external program and capture its standard output.
    Command {
        /// Executable to run.
        program: String,
        /// Arguments; `{input}`, `{type}` and `{lite}` are substituted.
        #[serde(default)]
        args: Vec<String>,
        /// Extra argument appended when example data must be stripped.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lite_flag: Option<String>,
    },
}

/// Copyright holders printed in the banner of every generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Holder of the original metadata, paired with the type's first year.
    pub original_holder: String,
    /// Holder of the Rust adaptation, paired with the type's second year.
    pub adaptation_holder: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            original_holder: "The Libphonenumber Authors".to_string(),
            adaptation_holder: "Kashin Vladislav (Rust adaptation author)".to_string(),
        }
    }
}

/// Naming of generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File extension of generated artifacts, without the dot.
    pub extension: String,
    /// File name of the aggregated module.
    pub module_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "rs".to_string(),
            module_file: "mod.rs".to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration following the lookup order.
    ///
    /// An explicit path must exist; the platform default is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or if any file that is
    /// read cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {e}", path.display()))
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Platform configuration file, e.g. `~/.config/phonemeta/global.toml` on Linux.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "rlibphonenumber", "phonemeta")
            .map(|dirs| dirs.config_dir().join("global.toml"))
    }

    fn validate(&self) -> Result<()> {
        if let ConverterConfig::Command { program, .. } = &self.converter {
            if program.trim().is_empty() {
                return Err(Error::Config("converter.program must not be empty".into()));
            }
        }
        let ext = &self.output.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(Error::Config(format!(
                "output.extension must be a bare extension, got '{ext}'"
            )));
        }
        if self.output.module_file.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "output.module_file must be a file name, got '{}'",
                self.output.module_file
            )));
        }
        Ok(())
    }
}
