//! Command implementations for the phonemeta CLI
//!
//! Each subcommand lives in its own submodule. Commands print a short
//! confirmation to stdout; failures are propagated to the caller, which
//! reports them once and maps them to an exit code.

mod aggregate;
mod batch;
mod build;
mod types;

pub use aggregate::execute as aggregate_modules;
pub use batch::execute as run_batch;
pub use build::execute as build_artifact;
pub use types::execute as list_types;
