//! # ixmon
//!
//! **CLI Binary**
//!
//! Entry point for the `ixmon` command-line application. It resolves
//! settings, installs logging and dispatches to the command handlers.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load `ixmon.toml`
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod cli;
mod commands;
mod config;
mod error_hints;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;

pub use cli::{Cli, Commands, GlobalArgs, OutputFormat};

/// Parse the process arguments and run the selected command.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    logging::init(cli.global.verbose);
    let settings = config::resolve_settings(&cli.global)?;
    commands::dispatch(cli.command, &settings)
}

/// Render an error with its context chain and any matching hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
