//! Error types and handling for phonemeta-core operations.
//!
//! Every failure of a generation run falls into one of a few categories:
//!
//! - **Usage Errors**: malformed invocations, unknown types or variants, bad constant names
//! - **I/O Errors**: unreadable input, unwritable output directory
//! - **Conversion Errors**: the external converter rejected the metadata document
//! - **Configuration Errors**: unreadable or invalid configuration and manifest files
//!
//! Usage errors are always raised before any file is touched. None of the errors is
//! retried; each one aborts the whole invocation and no partial artifact is left on disk.
//!
//! ```rust
//! use phonemeta_core::{Error, Options};
//!
//! match Options::parse("build", &["build", "in.xml", "out"]) {
//!     Err(Error::Usage(msg)) => assert!(msg.contains("build")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for phonemeta-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The invocation did not have the expected shape.
    ///
    /// The message is the complete usage text, naming the invoking command and
    /// listing every valid metadata type.
    #[error("{0}")]
    Usage(String),

    /// I/O operation failed.
    ///
    /// Covers reading the input document, creating the output directory and
    /// persisting generated files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input document (or another named file) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The external converter failed or rejected the document.
    ///
    /// ## Common Causes
    ///
    /// - Malformed metadata XML
    /// - Converter program missing from `PATH`
    /// - Stripping example data requested from a converter that cannot do it
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization of TOML failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::Io(std::io::Error::other(err))
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// - `"usage"` - Malformed invocation
    /// - `"io"` - File system operations
    /// - `"not_found"` - Missing input files
    /// - `"conversion"` - External converter failures
    /// - `"config"` - Configuration and manifest problems
    /// - `"serialization"` - TOML format errors
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Io(_) => "io",
            Self::NotFound(_) => "not_found",
            Self::Conversion(_) => "conversion",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Whether the error was caused by how the tool was invoked rather than by
    /// the environment.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::Config(_) | Self::Serialization(_))
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
