//! CLI module for Jester.
//!
//! The widget has no desktop host of its own here: every command drives the
//! session core against the headless surface host and prints what it did.

mod commands;

use clap::Parser;
pub use commands::Cli;

use crate::error::JesterError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), JesterError> {
    let cli = Cli::parse();
    cli.execute()
}
