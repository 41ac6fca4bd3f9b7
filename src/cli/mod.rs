//! CLI module for topup-report
//!
//! Provides command-line interface for:
//! - run: Build and write the report (default)
//! - validate: Check the input documents only

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, InputArgs};
pub use commands::{report, resolve_config, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
