//! Batch generation from a TOML manifest.
//!
//! A manifest lists every artifact of a metadata build. All entries are
//! validated first, then generated one after another, and finally wired
//! together by the aggregate module.
//!
//! ```toml
//! output_dir = "src/generated/metadata"
//!
//! [[artifact]]
//! input = "resources/PhoneNumberMetadata.xml"
//! basename = "metadata"
//!
//! [[artifact]]
//! input = "resources/PhoneNumberMetadataForTesting.xml"
//! basename = "test_metadata"
//! const_name = "TEST_METADATA"
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::aggregator::{AggregateEntry, ModuleAggregator};
use crate::artifact::Generator;
use crate::options::Options;
use crate::{Error, Result};

const fn default_true() -> bool {
    true
}

/// One artifact of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestArtifact {
    /// Metadata source document.
    pub input: PathBuf,
    /// `[test_|lite_]<type>`.
    pub basename: String,
    /// Constant name, `METADATA` when absent.
    #[serde(default)]
    pub const_name: Option<String>,
}

/// A batch of artifacts sharing one output directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Directory receiving every artifact and the aggregate module.
    pub output_dir: PathBuf,
    /// Write the aggregate module after all artifacts.
    #[serde(default = "default_true")]
    pub aggregate: bool,
    /// Artifacts in generation order.
    #[serde(rename = "artifact", default)]
    pub artifacts: Vec<ManifestArtifact>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Files written by a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Generated artifacts, in manifest order.
    pub artifacts: Vec<PathBuf>,
    /// The aggregate module, if one was written.
    pub module: Option<PathBuf>,
}

impl Manifest {
    /// Load a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed, or lists
    /// no artifacts.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read manifest {}: {e}", path.display()))
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_toml(&content, base_dir)
            .map_err(|e| Error::Config(format!("Invalid manifest {}: {e}", path.display())))
    }

    /// Parse a manifest, resolving relative paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid manifest.
    pub fn from_toml(content: &str, base_dir: PathBuf) -> Result<Self> {
        let mut manifest: Self = toml::from_str(content)?;
        if manifest.artifacts.is_empty() {
            return Err(Error::Config("manifest lists no artifacts".to_string()));
        }
        manifest.base_dir = base_dir;
        Ok(manifest)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.base_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Output directory after resolution.
    #[must_use]
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    /// The raw invocation equivalent to `artifact`, labelled `command`.
    #[must_use]
    pub fn invocation(&self, command: &str, artifact: &ManifestArtifact) -> Vec<String> {
        let mut args = vec![
            command.to_string(),
            self.resolve(&artifact.input).display().to_string(),
            self.resolved_output_dir().display().to_string(),
            artifact.basename.clone(),
        ];
        if let Some(name) = &artifact.const_name {
            args.push(format!("--const-name={name}"));
        }
        args
    }

    /// Validate every entry, then generate them in order and aggregate.
    ///
    /// Nothing is generated if any entry fails to parse, or, when aggregating,
    /// if two entries share a module or a constant name. Generation stops at
    /// the first failing artifact.
    ///
    /// # Errors
    ///
    /// Returns the first usage, load or write error encountered.
    pub fn run(&self, generator: &Generator, command: &str) -> Result<BatchReport> {
        let options = self
            .artifacts
            .iter()
            .map(|artifact| Options::parse(command, &self.invocation(command, artifact)))
            .collect::<Result<Vec<_>>>()?;

        let entries = options
            .iter()
            .map(|opt| {
                AggregateEntry::new(opt.metadata_type(), opt.variant(), opt.constant_name())
            })
            .collect::<Result<Vec<_>>>()?;
        if self.aggregate {
            ModuleAggregator::validate(&entries)?;
        }

        let mut report = BatchReport::default();
        for opt in &options {
            report.artifacts.push(generator.generate(opt)?);
        }

        if self.aggregate {
            report.module = Some(generator.aggregate(&self.resolved_output_dir(), &entries)?);
        }

        info!(
            artifacts = report.artifacts.len(),
            aggregated = report.module.is_some(),
            "batch complete"
        );
        Ok(report)
    }
}
