//! The parse → load → render → write pipeline.
//!
//! Artifacts are rendered completely in memory and then written through a
//! temporary file in the destination directory, which is atomically renamed
//! into place. A failure at any step leaves no artifact behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::aggregator::{AggregateEntry, ModuleAggregator};
use crate::config::Config;
use crate::emitter::SourceEmitter;
use crate::loader::{ByteLoader, converter_from_config};
use crate::options::Options;
use crate::Result;

/// Generates artifacts and aggregate modules.
#[derive(Debug)]
pub struct Generator {
    loader: ByteLoader,
    emitter: SourceEmitter,
    extension: String,
    module_file: String,
}

impl Generator {
    /// Create a generator from its parts.
    pub fn new(loader: ByteLoader, emitter: SourceEmitter, extension: impl Into<String>) -> Self {
        Self {
            loader,
            emitter,
            extension: extension.into(),
            module_file: "mod.rs".to_string(),
        }
    }

    /// Create a generator as described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut generator = Self::new(
            ByteLoader::new(converter_from_config(&config.converter)),
            SourceEmitter::new(config.banner.clone()),
            config.output.extension.clone(),
        );
        generator.module_file.clone_from(&config.output.module_file);
        generator
    }

    /// Parse a raw invocation and generate its artifact.
    ///
    /// # Errors
    ///
    /// Usage errors are returned before any I/O; load and write errors abort
    /// without leaving a file behind.
    pub fn build<S: AsRef<str>>(&self, command: &str, args: &[S]) -> Result<PathBuf> {
        let options = Options::parse(command, args)?;
        self.generate(&options)
    }

    /// Generate the artifact described by `options`.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns loader errors unchanged and I/O errors from writing.
    pub fn generate(&self, options: &Options) -> Result<PathBuf> {
        let metadata_type = options.metadata_type();
        let variant = options.variant();
        debug!(
            input = %options.input_path().display(),
            %metadata_type,
            %variant,
            constant = options.constant_name(),
            "generating artifact"
        );

        let data = self.loader.load(
            options.input_path(),
            metadata_type,
            variant.strips_examples(),
        )?;
        let source = self
            .emitter
            .render(metadata_type, &data, options.constant_name())?;

        let file_name = format!("{}.{}", options.basename(), self.extension);
        let path = write_atomically(options.output_dir(), &file_name, source.as_bytes())?;
        info!(path = %path.display(), bytes = data.len(), "wrote metadata artifact");
        Ok(path)
    }

    /// Write the aggregate module for `entries` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns usage errors from the aggregator and I/O errors from writing.
    pub fn aggregate(&self, output_dir: &Path, entries: &[AggregateEntry]) -> Result<PathBuf> {
        let source = ModuleAggregator::new(self.emitter.clone()).render(entries)?;
        for entry in entries {
            let artifact = output_dir.join(format!("{}.{}", entry.module_name(), self.extension));
            if !artifact.exists() {
                warn!(path = %artifact.display(), "aggregated module has no generated artifact yet");
            }
        }
        let path = write_atomically(output_dir, &self.module_file, source.as_bytes())?;
        info!(path = %path.display(), entries = entries.len(), "wrote aggregate module");
        Ok(path)
    }

    /// File name of the aggregate module.
    #[must_use]
    pub fn module_file(&self) -> &str {
        &self.module_file
    }
}

/// Mode of newly generated files; replaced files keep their previous mode.
#[cfg(unix)]
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Write `contents` to `dir/file_name`, creating `dir` if needed.
///
/// The file appears atomically: readers either see the previous file or the
/// complete new one. Permissions are those of the file being replaced, or
/// `0644` for a new file.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or written.
pub fn write_atomically(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    let path = dir.join(file_name);
    apply_permissions(&tmp, &path)?;
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

#[cfg(unix)]
fn apply_permissions(tmp: &NamedTempFile, target: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(target)
        .map_or(DEFAULT_FILE_MODE, |meta| meta.permissions().mode() & 0o7777);
    tmp.as_file().set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_permissions(_tmp: &NamedTempFile, _target: &Path) -> io::Result<()> {
    Ok(())
}
