//! Contributor resolution from `git log`
//!
//! The addon treats contributor resolution as an injected collaborator:
//! a `ContributorLookup` takes a file path, the platform tty device, and
//! the contributor options, and returns an ordered list of records or a
//! classified failure. `GitLogLookup` is the production implementation;
//! tests substitute their own.
//!
//! The failure classification is deliberately typed: the one failure the
//! mode controller reacts to (the terminal device being unavailable, as
//! in headless CI) is its own variant instead of a substring match on an
//! error message.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::config::ContributorOptions;

/// Attribution data for one author of a file.
///
/// Opaque to the addon core: records are appended to the route's
/// contributor list in the order the lookup produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// Author name as recorded by git.
    pub name: String,
    /// Author email as recorded by git.
    pub email: String,
    /// Number of commits touching the file.
    pub commits: usize,
    /// Most recent author timestamp (RFC 3339), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

/// Classified contributor-lookup failure.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The controlling terminal device could not be used. Common in
    /// CI/headless environments; the only variant the mode controller
    /// reacts to.
    #[error("the path {device} does not exist")]
    TtyUnavailable { device: String },

    /// git exited non-zero for some other reason.
    #[error("git log failed: {0}")]
    GitFailed(String),

    /// The subprocess could not be spawned or waited on.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contributor-resolution collaborator.
pub trait ContributorLookup {
    /// Resolve the ordered contributor list for `file`.
    ///
    /// # Arguments
    /// * `file` - Absolute path to the page's component file
    /// * `tty_device` - Platform terminal device the invocation may need
    /// * `options` - Contributor options (extra log arguments)
    fn contributors(
        &self,
        file: &Path,
        tty_device: &str,
        options: &ContributorOptions,
    ) -> Result<Vec<ContributorRecord>, LookupError>;
}

/// Production lookup shelling out to `git log`.
pub struct GitLogLookup {
    repo_root: PathBuf,
}

impl GitLogLookup {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl ContributorLookup for GitLogLookup {
    fn contributors(
        &self,
        file: &Path,
        tty_device: &str,
        options: &ContributorOptions,
    ) -> Result<Vec<ContributorRecord>, LookupError> {
        // Some git setups insist on a controlling terminal for log
        // invocations; feed the device through stdin like an interactive
        // session would.
        let tty = File::open(tty_device).map_err(|_| LookupError::TtyUnavailable {
            device: tty_device.to_string(),
        })?;

        let mut cmd = Command::new("git");
        cmd.args(["log", "--follow", "--no-merges", "--pretty=format:%an|%ae|%at"]);
        for arg in options.log_args.split_whitespace() {
            cmd.arg(arg);
        }
        cmd.arg("--").arg(file);
        cmd.current_dir(&self.repo_root)
            .stdin(Stdio::from(tty))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running contributor lookup for {}", file.display());
        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains(tty_device) {
                return Err(LookupError::TtyUnavailable {
                    device: tty_device.to_string(),
                });
            }
            return Err(LookupError::GitFailed(stderr));
        }

        Ok(aggregate_log_output(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }
}

/// Fold `%an|%ae|%at` lines into per-author records, first-seen order.
fn aggregate_log_output(output: &str) -> Vec<ContributorRecord> {
    let mut records: Vec<ContributorRecord> = Vec::new();
    let mut latest: Vec<i64> = Vec::new();

    for line in output.lines() {
        let mut parts = line.splitn(3, '|');
        let (Some(name), Some(email)) = (parts.next(), parts.next()) else {
            continue;
        };
        let epoch = parts.next().and_then(|t| t.trim().parse::<i64>().ok());

        let position = records
            .iter()
            .position(|r| r.name == name && r.email == email);
        match position {
            Some(i) => {
                records[i].commits += 1;
                if let Some(at) = epoch {
                    latest[i] = latest[i].max(at);
                }
            }
            None => {
                records.push(ContributorRecord {
                    name: name.to_string(),
                    email: email.to_string(),
                    commits: 1,
                    last_commit: None,
                });
                latest.push(epoch.unwrap_or(0));
            }
        }
    }

    for (record, at) in records.iter_mut().zip(latest) {
        record.last_commit = format_author_time(at);
    }
    records
}

/// Format an author epoch as RFC 3339; zero/invalid epochs yield `None`.
fn format_author_time(epoch: i64) -> Option<String> {
    if epoch <= 0 {
        return None;
    }
    Utc.timestamp_opt(epoch, 0).single().map(|dt| dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_by_author_in_first_seen_order() {
        let records = aggregate_log_output(
            "Ada Lovelace|ada@example.com|1700000100\n\
             Grace Hopper|grace@example.com|1700000200\n\
             Ada Lovelace|ada@example.com|1700000300\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ada Lovelace");
        assert_eq!(records[0].commits, 2);
        assert_eq!(records[1].name, "Grace Hopper");
        assert_eq!(records[1].commits, 1);
        // Latest timestamp wins regardless of line order
        assert_eq!(
            records[0].last_commit.as_deref(),
            Some("2023-11-14T22:18:20+00:00")
        );
    }

    #[test]
    fn same_name_different_email_stays_separate() {
        let records = aggregate_log_output(
            "Ada|ada@home.example|1700000000\nAda|ada@work.example|1700000000\n",
        );
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let records = aggregate_log_output("not-a-record\nAda|ada@example.com|oops\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_commit, None);
    }

    #[test]
    fn missing_tty_device_classifies_as_tty_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = GitLogLookup::new(dir.path());
        let err = lookup
            .contributors(
                Path::new("pages/a.md"),
                "/nonexistent/tty-device",
                &ContributorOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, LookupError::TtyUnavailable { ref device } if device == "/nonexistent/tty-device"));
    }

    #[test]
    #[cfg(unix)]
    fn lookup_against_real_repo_counts_commits() {
        let dir = tempfile::tempdir().unwrap();
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(dir.path())
                .output()
                .unwrap()
        };
        run(&["init"]);
        run(&["config", "user.name", "Test User"]);
        run(&["config", "user.email", "test@example.com"]);
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/a.md"), "one").unwrap();
        run(&["add", "-A"]);
        run(&["commit", "-m", "first"]);
        std::fs::write(dir.path().join("pages/a.md"), "two").unwrap();
        run(&["add", "-A"]);
        run(&["commit", "-m", "second"]);

        let lookup = GitLogLookup::new(dir.path());
        let records = lookup
            .contributors(
                &dir.path().join("pages/a.md"),
                "/dev/null",
                &ContributorOptions::default(),
            )
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Test User");
        assert_eq!(records[0].commits, 2);
        assert!(records[0].last_commit.is_some());
    }
}
