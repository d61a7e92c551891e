//! # scr
//!
//! Small script steps that stop at the first failure.
//!
//! ## Usage
//!
//! - Run a program: `scr exec git status`
//! - Print matching lines: `scr grep abc example`
//!
//! Set `SCR_LOG=debug` (or pass `--verbose`) to see what runs.

use std::process::ExitCode;

/// Entry point for the CLI tool.
fn main() -> ExitCode {
    scr::cli::run_cli()
}
