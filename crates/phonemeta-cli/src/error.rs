//! CLI error handling with semantic exit codes.
//!
//! Failures are categorized so that build scripts can tell a bad invocation
//! from a broken converter or an unwritable output directory.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Artifact(s) written |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, configuration or manifest |
//! | 3 | `NotFound` | Input document does not exist |
//! | 4 | `Conversion` | The converter rejected the metadata document |
//! | 5 | `Io` | Reading input or writing output failed |
//!
//! # Usage
//!
//! ```bash
//! phonemeta build resources/PhoneNumberMetadata.xml src/generated metadata
//! case $? in
//!     0) echo "generated" ;;
//!     2) echo "bad invocation" ;;
//!     4) echo "converter failed" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, configuration or manifest (exit code 2).
    ///
    /// Nothing has been written when this is reported.
    Usage = 2,

    /// The input document does not exist (exit code 3).
    NotFound = 3,

    /// The converter failed to serialize the document (exit code 4).
    Conversion = 4,

    /// Filesystem failure while reading or writing (exit code 5).
    Io = 5,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Conversion => "conversion error",
            Self::Io => "i/o error",
        }
    }

    /// Category of a core error.
    #[must_use]
    pub fn from_core(err: &phonemeta_core::Error) -> Self {
        use phonemeta_core::Error;
        match err {
            Error::Usage(_) | Error::Config(_) | Error::Serialization(_) => Self::Usage,
            Error::NotFound(_) => Self::NotFound,
            Error::Conversion(_) => Self::Conversion,
            Error::Io(_) => Self::Io,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` with an `ErrorCategory` to enable proper
/// exit codes while preserving full error context and chains.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the category of an `anyhow::Error`.
///
/// An explicit `CliError` wins; otherwise the first core error found in the
/// chain decides. Anything else is internal.
#[must_use]
pub fn category_from_error(err: &anyhow::Error) -> ErrorCategory {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.category;
    }

    err.chain()
        .find_map(|cause| cause.downcast_ref::<phonemeta_core::Error>())
        .map_or(ErrorCategory::Internal, ErrorCategory::from_core)
}
