//! Repository identity and root resolution
//!
//! The remote URL resolver never fails outward: any problem (no remote,
//! no repository, git missing, timeout) is logged for the operator and
//! collapsed into the empty-string sentinel. Root resolution is the one
//! setup step that must succeed for the addon to work at all.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

use super::process::{run_git, run_git_with_timeout};

/// Deadline for the `git remote get-url origin` call.
const REMOTE_URL_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve the remote origin URL for the repository containing `dir`.
///
/// Returns the trimmed URL on success and `""` on any failure. The empty
/// string is the published "unknown" sentinel, not an error state.
pub fn repository_url(dir: &Path) -> String {
    let result = run_git_with_timeout(dir, &["remote", "get-url", "origin"], REMOTE_URL_TIMEOUT)
        .and_then(|out| out.require_success("git remote get-url origin"));

    match result {
        Ok(url) => url,
        Err(err) => {
            error!("Failed to get repository URL: {err:#}");
            info!(
                "Repository URL could not be automatically retrieved. \
                 Please configure the repository URL manually."
            );
            if let Ok(remotes) = run_git(dir, &["remote", "-v"]) {
                info!("{}", remotes.stdout.trim_end());
            }
            String::new()
        }
    }
}

/// Resolve the repository root (`git rev-parse --show-toplevel`) for `dir`.
pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let top = run_git(dir, &["rev-parse", "--show-toplevel"])?
        .require_success("git rev-parse --show-toplevel")
        .with_context(|| format!("{} is not inside a git repository", dir.display()))?;
    Ok(PathBuf::from(top))
}
