//! CLI module for otto-probe.
//!
//! Provides command-line argument parsing for the probe binary.

pub mod args;

pub use args::{parse_args, CliOptions};

/// Crate version shown by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
