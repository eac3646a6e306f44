//! Addon options
//!
//! Supports loading options from:
//! - The host framework (merged user-supplied overrides)
//! - A project-level `gitlog.toml` next to the site root

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project config file name, resolved relative to the site root.
pub const PROJECT_CONFIG_FILE: &str = "gitlog.toml";

/// Strategy used to resolve contributors for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContributorMode {
    /// Attribution deferred to an external API-based mechanism.
    #[default]
    Api,
    /// Attribution computed locally from `git log`.
    Log,
}

impl std::fmt::Display for ContributorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContributorMode::Api => write!(f, "api"),
            ContributorMode::Log => write!(f, "log"),
        }
    }
}

impl std::str::FromStr for ContributorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "api" => Ok(ContributorMode::Api),
            "log" => Ok(ContributorMode::Log),
            other => anyhow::bail!("unknown contributor mode '{other}' (expected 'api' or 'log')"),
        }
    }
}

/// Contributor-resolution options.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContributorOptions {
    /// Resolution strategy. Defaults to `api` when unset.
    #[serde(default)]
    pub mode: ContributorMode,

    /// Extra whitespace-separated arguments forwarded to the log-based
    /// lookup invocation.
    #[serde(default)]
    pub log_args: String,
}

/// Options for the addon, fixed at setup time.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GitLogOptions {
    #[serde(default)]
    pub contributor: ContributorOptions,

    /// Tri-state debug switch: `Some(true)` forces verbose output,
    /// `Some(false)` suppresses it, `None` routes through the passive
    /// debug channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl GitLogOptions {
    /// Load options from `gitlog.toml` under `root`, falling back to
    /// defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Merge another set of options into this one (other takes priority).
    pub fn merge(&mut self, other: GitLogOptions) {
        if other.contributor.mode != ContributorMode::default() {
            self.contributor.mode = other.contributor.mode;
        }
        if !other.contributor.log_args.is_empty() {
            self.contributor.log_args = other.contributor.log_args;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }

    /// Whether verbose debug output was explicitly requested.
    pub fn debug_forced(&self) -> bool {
        self.debug == Some(true)
    }

    /// Whether debug output was explicitly suppressed.
    pub fn debug_suppressed(&self) -> bool {
        self.debug == Some(false)
    }
}

/// Load project options for a site root (missing file yields defaults).
pub fn load_project_options(root: &Path) -> Result<GitLogOptions> {
    GitLogOptions::load(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_api_when_unset() {
        let options: GitLogOptions = toml::from_str("").unwrap();
        assert_eq!(options.contributor.mode, ContributorMode::Api);
        assert_eq!(options.debug, None);
    }

    #[test]
    fn parses_full_config() {
        let options: GitLogOptions = toml::from_str(
            r#"
            debug = true

            [contributor]
            mode = "log"
            log_args = "--since=1.year"
            "#,
        )
        .unwrap();
        assert_eq!(options.contributor.mode, ContributorMode::Log);
        assert_eq!(options.contributor.log_args, "--since=1.year");
        assert!(options.debug_forced());
    }

    #[test]
    fn merge_prefers_overrides() {
        let mut base: GitLogOptions = toml::from_str("[contributor]\nmode = \"log\"").unwrap();
        base.merge(GitLogOptions {
            contributor: ContributorOptions {
                mode: ContributorMode::default(),
                log_args: "--follow".to_string(),
            },
            debug: Some(false),
        });
        // Default mode in the override does not clobber an explicit one.
        assert_eq!(base.contributor.mode, ContributorMode::Log);
        assert_eq!(base.contributor.log_args, "--follow");
        assert!(base.debug_suppressed());
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = GitLogOptions::load(dir.path()).unwrap();
        assert_eq!(options, GitLogOptions::default());
    }
}
