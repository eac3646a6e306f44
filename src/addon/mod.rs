//! The git-log addon
//!
//! Setup resolves everything that is fixed for the process lifetime
//! (repository URL, repository root, platform tty device, initial
//! contributor mode); the hooks then decorate routes as the host
//! discovers them. All failure paths degrade functionality instead of
//! aborting the build.

pub mod mode;

use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::{ContributorMode, GitLogOptions};
use crate::git::{self, ContributorLookup, GitLogLookup};
use crate::host::{AddonHooks, AddonManifest, BuildContext, ManifestOptions};
use crate::route::Route;

pub use mode::{FailureDisposition, ModeController, Platform};

/// Build-time addon decorating routes with git metadata.
pub struct GitLogAddon {
    options: GitLogOptions,
    repository_url: String,
    repo_root: PathBuf,
    /// Root of the content tree; only files under `<working_dir>/pages`
    /// are ever attributed.
    working_dir: PathBuf,
    controller: ModeController,
    lookup: Box<dyn ContributorLookup>,
}

impl GitLogAddon {
    /// Set up the addon for the process working directory.
    pub fn setup(options: GitLogOptions) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::setup_in(options, cwd)
    }

    /// Set up the addon for an explicit working directory.
    ///
    /// Resolves the repository URL (absorbed failure, empty-string
    /// sentinel) and the repository root (fails when `working_dir` is
    /// not inside a repository).
    pub fn setup_in(options: GitLogOptions, working_dir: impl Into<PathBuf>) -> Result<Self> {
        let working_dir = working_dir.into();
        let repository_url = git::repository_url(&working_dir);
        let repo_root = git::repo_root(&working_dir)?;
        let controller = ModeController::new(options.contributor.mode, Platform::current());
        let lookup = Box::new(GitLogLookup::new(repo_root.clone()));

        Ok(Self {
            options,
            repository_url,
            repo_root,
            working_dir,
            controller,
            lookup,
        })
    }

    /// Replace the contributor-lookup collaborator (tests, API-backed hosts).
    pub fn with_lookup(mut self, lookup: Box<dyn ContributorLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Override the platform the mode controller classifies failures on.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.controller = ModeController::new(self.controller.mode(), platform);
        self
    }

    /// Registration data for the host, with the derived repository URL.
    pub fn manifest(&self) -> AddonManifest {
        AddonManifest {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            enable: true,
            options: ManifestOptions {
                options: self.options.clone(),
                repository_url: self.repository_url.clone(),
            },
        }
    }

    /// Remote origin URL, `""` when unknown.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// The active contributor mode (downgrades are visible here).
    pub fn contributor_mode(&self) -> ContributorMode {
        self.controller.mode()
    }

    /// Verbose pre-build report: platform, git version, recent history.
    fn emit_debug_report(&self) -> Result<()> {
        info!("{}: {}", style("Platform").blue(), self.controller.platform().name());

        let version = git::run_git(&self.repo_root, &["--version"])?
            .require_success("git --version")?;
        info!("{version}");

        let pretty = format!(
            "--pretty=format:{} {} {} {}",
            style("%ar").dim().green(),
            style("%h").magenta().bold(),
            style("%an").green().bold(),
            style("%s").yellow().bold(),
        );
        let log = git::run_git(
            &self.repo_root,
            &["log", "--no-merges", "--max-count=30", &pretty],
        )?
        .require_success("git log")?;
        info!("\n{log}");
        Ok(())
    }

    fn decorate(&mut self, route: &mut Route) {
        let Some(component) = route.component.clone() else {
            // Non-content route, nothing to decorate.
            return;
        };

        route.frontmatter.git_log_mut().path = git_relative_path(&component, &self.repo_root);

        if self.controller.mode() == ContributorMode::Api {
            // Attribution is deferred to an external API-based mechanism.
            return;
        }

        // Only allow files from the working directory's 'pages' folder;
        // generated and external pages are never attributed.
        if !component.starts_with(self.working_dir.join("pages")) {
            return;
        }

        let tty = self.controller.platform().tty_device();
        match self
            .lookup
            .contributors(&component, tty, &self.options.contributor)
        {
            Ok(contributors) => {
                let git_log = route.frontmatter.git_log_mut();
                for contributor in &contributors {
                    git_log.contributors.push(contributor.clone());
                }
                self.emit_lookup_debug(&component, &contributors);
            }
            Err(err) => {
                self.controller.note_failure(&err);
            }
        }
    }

    /// Per-route debug block: forced-info when `debug = true`, passive
    /// debug when unset, suppressed when `debug = false`.
    fn emit_lookup_debug(&self, component: &Path, contributors: &[crate::git::ContributorRecord]) {
        if self.options.debug_suppressed() {
            return;
        }
        let block = format!(
            "gitlog-addon(debug):\n {} {}: {}\n {} {}: {}",
            style("├─").dim(),
            style("FilePath").blue(),
            style(component.display()).underlined(),
            style("└─").dim(),
            style("Contributors").blue(),
            serde_json::to_string(contributors).unwrap_or_else(|_| "[]".to_string()),
        );
        if self.options.debug_forced() {
            info!("{block}");
        } else {
            debug!("{block}");
        }
    }
}

impl AddonHooks for GitLogAddon {
    fn before_build(&mut self, _ctx: &BuildContext) {
        if !self.options.debug_forced() {
            return;
        }
        if let Err(err) = self.emit_debug_report() {
            error!("gitlog-addon encountered an error: {err:#}");
        }
    }

    fn extend_route(&mut self, route: &mut Route) {
        self.decorate(route);
    }
}

/// Component path relative to the repository root, leading separator
/// stripped.
fn git_relative_path(component: &Path, repo_root: &Path) -> String {
    let rel = component.strip_prefix(repo_root).unwrap_or(component);
    rel.to_string_lossy()
        .trim_start_matches(std::path::MAIN_SEPARATOR)
        .replace(std::path::MAIN_SEPARATOR, "/")
}
