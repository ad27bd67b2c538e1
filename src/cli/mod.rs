//! CLI module for quorum
//!
//! Provides command-line interface for:
//! - init: Create the data directory and an empty aggregate
//! - exec: One-shot request execution
//! - serve: Line-delimited request loop on stdin
//! - whoami: Print the client identity

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{exec, init, run, run_command, serve, whoami};
pub use errors::{CliError, CliErrorCode, CliResult};
