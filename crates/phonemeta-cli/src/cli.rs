//! # CLI Structure and Argument Parsing
//!
//! Command-line interface for `phonemeta`, the phone number metadata compiler.
//! Built with `clap` derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # One artifact
//! phonemeta build resources/PhoneNumberMetadata.xml src/generated metadata
//! phonemeta build resources/ShortNumberMetadata.xml src/generated lite_short_numbers --const-name=SHORT
//!
//! # Umbrella module for artifacts already generated
//! phonemeta aggregate src/generated metadata test_metadata:TEST_METADATA
//!
//! # A whole build described in a manifest
//! phonemeta batch phonemeta.toml
//!
//! # Known metadata types
//! phonemeta types
//! ```
//!
//! `build` forwards its tokens untouched to the option parser, so global flags
//! must come before the subcommand (`phonemeta -v build ...`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the `phonemeta` command
#[derive(Parser, Clone, Debug)]
#[command(name = "phonemeta")]
#[command(version)]
#[command(about = "phonemeta - compile phone number metadata into Rust byte-array constants", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "PHONEMETA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate one metadata artifact
    ///
    /// Takes `<inputXmlFile> <outputDir> <basename> [--const-name=<NAME>]` where the
    /// basename is `<type>`, `test_<type>` or `lite_<type>`.
    #[command(
        override_usage = "phonemeta build <inputXmlFile> <outputDir> ( <type> | test_<type> | lite_<type> ) [--const-name=<nameOfMetadataConstant>]"
    )]
    Build {
        /// Raw invocation tokens
        #[arg(
            value_name = "ARGS",
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 0..
        )]
        args: Vec<String>,
    },

    /// Write the umbrella module re-exporting generated artifacts
    Aggregate {
        /// Directory containing the artifacts
        output_dir: PathBuf,

        /// Artifacts as `basename[:CONSTANT]`; the constant defaults to the upper-cased basename
        #[arg(required = true, value_name = "ENTRY")]
        entries: Vec<String>,
    },

    /// Generate every artifact listed in a TOML manifest
    Batch {
        /// Path to the manifest
        manifest: PathBuf,
    },

    /// List metadata types with their basenames and years
    Types,
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_keeps_const_name_token() {
        let cli = Cli::try_parse_from([
            "phonemeta",
            "build",
            "in.xml",
            "out",
            "metadata",
            "--const-name=TEST",
        ])
        .unwrap();

        match cli.command {
            Commands::Build { args } => {
                assert_eq!(args, ["in.xml", "out", "metadata", "--const-name=TEST"]);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_build_accepts_any_arity() {
        let cli = Cli::try_parse_from(["phonemeta", "build", "in.xml"]).unwrap();

        assert!(matches!(cli.command, Commands::Build { ref args } if args.len() == 1));
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["phonemeta", "-v", "--no-color", "types"]).unwrap();

        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Types));
    }

    #[test]
    fn test_aggregate_requires_entries() {
        assert!(Cli::try_parse_from(["phonemeta", "aggregate", "out"]).is_err());

        let cli =
            Cli::try_parse_from(["phonemeta", "aggregate", "out", "metadata", "test_metadata:T"])
                .unwrap();
        match cli.command {
            Commands::Aggregate {
                output_dir,
                entries,
            } => {
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(entries, ["metadata", "test_metadata:T"]);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["phonemeta", "-v", "-q", "types"]).is_err());
    }
}
