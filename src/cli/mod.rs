//! CLI command definitions and handlers
//!
//! The binary is a debug harness around the addon: `inspect` plays host
//! for a directory and prints the decorated routes, `doctor` checks the
//! environment the addon depends on.

mod doctor;
mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ContributorMode;

/// gitlog-addon - git metadata for static-site routes
#[derive(Parser, Debug)]
#[command(name = "gitlog-addon")]
#[command(
    version,
    about = "Decorate static-site routes with git history metadata (relative path, contributors)",
    after_help = "\
Examples:
  gitlog-addon inspect .                       Decorate pages/ of the current site
  gitlog-addon inspect . --mode log            Resolve contributors from git log
  gitlog-addon inspect . --debug               Verbose per-route debug output
  gitlog-addon doctor                          Check git, remote, and tty availability"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decorate every page under <DIR>/pages and print one JSON object per route
    Inspect {
        /// Site root (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Contributor resolution mode (overrides gitlog.toml)
        #[arg(long)]
        mode: Option<ContributorMode>,

        /// Extra arguments forwarded to the log-based lookup
        #[arg(long)]
        log_args: Option<String>,

        /// Force verbose debug output
        #[arg(long)]
        debug: bool,
    },

    /// Check the environment the addon depends on
    Doctor {
        /// Site root (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect {
            dir,
            mode,
            log_args,
            debug,
        } => inspect::run(&dir, mode, log_args, debug),
        Commands::Doctor { dir } => doctor::run(&dir),
    }
}
