//! Synchronous `git` subprocess execution
//!
//! Two entry points: `run_git` waits with the default (unbounded)
//! timeout, `run_git_with_timeout` polls `try_wait` and kills the child
//! when the deadline passes. Both capture stdout/stderr as UTF-8 text.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::warn;

/// Result of a completed (or timed-out) git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
    /// Process exit code, `None` when killed by a signal or timeout.
    pub exit_code: Option<i32>,
    /// Whether the invocation was killed after exceeding its deadline.
    pub timed_out: bool,
}

impl GitOutput {
    /// Whether git exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }

    /// Trimmed stdout, or an error carrying the stderr text.
    pub fn require_success(self, what: &str) -> Result<String> {
        if self.timed_out {
            anyhow::bail!("{what} timed out");
        }
        if !self.success() {
            anyhow::bail!("{what} failed: {}", self.stderr.trim());
        }
        Ok(self.stdout.trim().to_string())
    }
}

/// Run `git <args>` in `dir` and wait for it to finish.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    Ok(GitOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
        timed_out: false,
    })
}

/// Run `git <args>` in `dir`, killing the child if it outlives `timeout`.
pub fn run_git_with_timeout(dir: &Path, args: &[&str], timeout: Duration) -> Result<GitOutput> {
    let mut child = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    let start = Instant::now();

    // Poll for completion with small sleep intervals
    loop {
        match child.try_wait().context("Failed to wait for git")? {
            Some(status) => {
                let mut stdout = String::new();
                let mut stderr = String::new();
                if let Some(mut s) = child.stdout.take() {
                    let _ = s.read_to_string(&mut stdout);
                }
                if let Some(mut s) = child.stderr.take() {
                    let _ = s.read_to_string(&mut stderr);
                }
                return Ok(GitOutput {
                    stdout,
                    stderr,
                    exit_code: status.code(),
                    timed_out: false,
                });
            }
            None => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!("git {} timed out after {:?}", args.join(" "), timeout);
                    return Ok(GitOutput {
                        stdout: String::new(),
                        stderr: String::new(),
                        exit_code: None,
                        timed_out: true,
                    });
                }
                std::thread::sleep(Duration::from_millis(25));
            }
        }
    }
}
