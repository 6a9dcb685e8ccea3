//! CLI module for strindex
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the data directory
//! - serve: Load the store and serve the HTTP API
//! - analyze: One-shot property derivation

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{analyze, init, open_state, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
