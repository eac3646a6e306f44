//! gitlog-addon - git metadata for static-site routes
//!
//! A build-time addon for a static-site generator host: it resolves the
//! repository's identity once at setup, then decorates every content
//! route the host discovers with the file's repository-relative path
//! and, in `log` mode, an ordered contributor list derived from
//! `git log`.
//!
//! The host drives the addon through the [`host::AddonHooks`] trait;
//! all git access goes through the `git` CLI.

pub mod addon;
pub(crate) mod cli;
pub mod config;
pub mod git;
pub mod host;
pub mod route;

pub use addon::{GitLogAddon, ModeController, Platform};
pub use config::{ContributorMode, ContributorOptions, GitLogOptions};
pub use git::{ContributorLookup, ContributorRecord, GitLogLookup, LookupError};
pub use host::{AddonHooks, AddonManifest, BuildContext};
pub use route::{Frontmatter, GitLogMeta, Route};

/// Entry point used by the companion binary.
pub fn run_cli() -> anyhow::Result<()> {
    use clap::Parser;
    let parsed = cli::Cli::parse();
    cli::run(parsed)
}
