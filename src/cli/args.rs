//! CLI argument definitions using clap
//!
//! Commands:
//! - topup-report run [--config <path>] [--companies <path>] [--users <path>] [--output <path>] [--lenient]
//! - topup-report validate [--config <path>] [--companies <path>] [--users <path>] [--lenient]
//!
//! Without a subcommand, `run` executes with default paths.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// topup-report - apply company token top-ups and report who gets emailed
#[derive(Parser, Debug)]
#[command(name = "topup-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Build the report and write it to the output file
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Report destination (default: output.txt)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check both input documents without writing a report
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Run {
            inputs: InputArgs::default(),
            output: None,
        }
    }
}

/// Options shared by every command
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct InputArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Companies document (default: companies.json)
    #[arg(long)]
    pub companies: Option<PathBuf>,

    /// Users document (default: users.json)
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Skip schema validation and keep inactive users
    #[arg(long)]
    pub lenient: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
