//! # phonemeta-core
//!
//! Core functionality for phonemeta - a build-time compiler that turns phone
//! number metadata documents into Rust source files embedding the serialized
//! metadata as `[u8; N]` constants.
//!
//! ## Architecture
//!
//! The crate is organized around a small pipeline:
//!
//! - **Options**: Parse and validate the raw invocation (`input outdir basename [--const-name]`)
//! - **Loading**: Turn the input document into bytes through a pluggable [`MetadataConverter`]
//! - **Emitting**: Render the licensing banner and the byte-array constant
//! - **Artifacts**: Write the rendered source atomically into the output directory
//! - **Aggregation**: Wire several artifacts together in one `mod.rs`
//! - **Manifests**: Drive a whole metadata build from a TOML file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phonemeta_core::{Config, Generator, Result};
//!
//! let config = Config::load(None)?;
//! let generator = Generator::from_config(&config);
//!
//! let path = generator.build(
//!     "build",
//!     &["build", "resources/PhoneNumberMetadata.xml", "src/generated", "metadata"],
//! )?;
//! println!("wrote {}", path.display());
//! # Ok::<(), phonemeta_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`]. Usage errors are detected before
//! any I/O, so a rejected invocation never touches the output directory:
//!
//! ```rust
//! use phonemeta_core::{Error, Options};
//!
//! match Options::parse("build", &["build", "in.xml", "out", "xxx"]) {
//!     Err(Error::Usage(msg)) => assert!(msg.starts_with("Usage: build")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

/// Umbrella module rendering
pub mod aggregator;
/// Generation pipeline and atomic file writes
pub mod artifact;
/// Configuration management
pub mod config;
/// Licensing banner and byte-array rendering
pub mod emitter;
/// Error types and result aliases
pub mod error;
/// Converters producing the serialized payload
pub mod loader;
/// Batch manifests
pub mod manifest;
/// Invocation parsing
pub mod options;
/// Metadata types and build variants
pub mod types;

pub use aggregator::{AggregateEntry, ModuleAggregator};
pub use artifact::{Generator, write_atomically};
pub use config::{BannerConfig, Config, ConverterConfig, OutputConfig};
pub use emitter::{BYTES_PER_LINE, SourceEmitter};
pub use error::{Error, Result};
pub use loader::{ByteLoader, CommandConverter, ConversionRequest, MetadataConverter, RawConverter};
pub use manifest::{BatchReport, Manifest, ManifestArtifact};
pub use options::{DEFAULT_CONSTANT_NAME, Options};
pub use types::{MetadataType, Variant};
