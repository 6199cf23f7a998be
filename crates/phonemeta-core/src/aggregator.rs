//! Umbrella module wiring generated artifacts into one namespace.
//!
//! Each artifact becomes a private submodule whose constant is re-exported.
//! Artifacts of the test variant are only compiled into test builds:
//!
//! ```text
//! mod metadata;
//! #[cfg(test)]
//! mod test_metadata;
//!
//! pub use metadata::METADATA;
//! #[cfg(test)]
//! pub use test_metadata::TEST_METADATA;
//! ```
//!
//! The aggregator is purely referential; it never looks at the payloads.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::emitter::SourceEmitter;
use crate::options::{is_valid_constant_name, parse_basename};
use crate::types::{MetadataType, Variant};
use crate::{Error, Result};

/// One generated artifact to re-export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    metadata_type: MetadataType,
    variant: Variant,
    constant_name: String,
}

impl AggregateEntry {
    /// Entry for the artifact of `metadata_type`/`variant` bound to `constant_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if `constant_name` is not a valid identifier.
    pub fn new(
        metadata_type: MetadataType,
        variant: Variant,
        constant_name: impl Into<String>,
    ) -> Result<Self> {
        let constant_name = constant_name.into();
        if !is_valid_constant_name(&constant_name) {
            return Err(Error::Usage(format!(
                "'{constant_name}' is not a valid constant name"
            )));
        }
        Ok(Self {
            metadata_type,
            variant,
            constant_name,
        })
    }

    /// Parse `basename[:CONSTANT]`.
    ///
    /// Without an explicit constant the upper-cased basename is used, so
    /// `test_metadata` re-exports `TEST_METADATA`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for an unknown basename or invalid constant.
    pub fn parse(token: &str) -> Result<Self> {
        let (basename, constant) = match token.split_once(':') {
            Some((basename, constant)) => (basename, constant.to_string()),
            None => (token, token.to_ascii_uppercase()),
        };
        let (metadata_type, variant) = parse_basename(basename).ok_or_else(|| {
            Error::Usage(format!(
                "'{basename}' is not a metadata basename ( <type> | test_<type> | lite_<type> )"
            ))
        })?;
        Self::new(metadata_type, variant, constant)
    }

    /// Module name, identical to the artifact's basename.
    #[must_use]
    pub fn module_name(&self) -> String {
        self.variant.basename(self.metadata_type)
    }

    /// Re-exported constant.
    #[must_use]
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    /// Variant of the artifact.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Type of the artifact.
    #[must_use]
    pub const fn metadata_type(&self) -> MetadataType {
        self.metadata_type
    }
}

/// Renders the umbrella module for a set of artifacts.
#[derive(Debug, Clone, Default)]
pub struct ModuleAggregator {
    emitter: SourceEmitter,
}

impl ModuleAggregator {
    /// Create an aggregator whose banner comes from `emitter`.
    pub const fn new(emitter: SourceEmitter) -> Self {
        Self { emitter }
    }

    /// Check that `entries` can be aggregated, without rendering anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if `entries` is empty or names a module or
    /// constant twice.
    pub fn validate(entries: &[AggregateEntry]) -> Result<()> {
        if entries.is_empty() {
            return Err(Error::Usage("no artifacts to aggregate".to_string()));
        }

        let mut modules = HashSet::new();
        let mut constants = HashSet::new();
        for entry in entries {
            if !modules.insert(entry.module_name()) {
                return Err(Error::Usage(format!(
                    "module '{}' listed more than once",
                    entry.module_name()
                )));
            }
            if !constants.insert(entry.constant_name.as_str()) {
                return Err(Error::Usage(format!(
                    "constant '{}' exported more than once",
                    entry.constant_name
                )));
            }
        }
        Ok(())
    }

    /// Render the module source for `entries`, in the given order.
    ///
    /// The banner carries the earliest first year and latest second year of
    /// the aggregated types.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if `entries` is empty or names a module or
    /// constant twice.
    pub fn render(&self, entries: &[AggregateEntry]) -> Result<String> {
        Self::validate(entries)?;

        let mut out = String::new();
        self.write_module(&mut out, entries)?;
        tracing::debug!(entries = entries.len(), "rendered aggregate module");
        Ok(out)
    }

    fn write_module(&self, out: &mut String, entries: &[AggregateEntry]) -> fmt::Result {
        let first_year = entries
            .iter()
            .map(|e| e.metadata_type.copyright_year())
            .min()
            .unwrap_or_default();
        let second_year = entries
            .iter()
            .map(|e| e.metadata_type.copyright_second_year())
            .max()
            .unwrap_or(first_year);
        self.emitter.write_banner(out, first_year, second_year)?;

        for entry in entries {
            write_gate(out, entry)?;
            writeln!(out, "mod {};", entry.module_name())?;
        }
        writeln!(out)?;
        for entry in entries {
            write_gate(out, entry)?;
            writeln!(
                out,
                "pub use {}::{};",
                entry.module_name(),
                entry.constant_name
            )?;
        }
        Ok(())
    }
}

fn write_gate(out: &mut String, entry: &AggregateEntry) -> fmt::Result {
    if entry.variant.is_test() {
        writeln!(out, "#[cfg(test)]")?;
    }
    Ok(())
}
