//! Git subprocess layer
//!
//! Everything the addon knows about a repository comes from shelling out
//! to the `git` CLI:
//!
//! - Resolve the remote origin URL (bounded timeout, absorbed failure)
//! - Resolve the repository root (`git rev-parse --show-toplevel`)
//! - Resolve per-file contributors from `git log`
//!
//! All output is text-encoded and trimmed; no libgit2 binding is used.

pub mod contributors;
pub mod process;
pub mod remote;

pub use contributors::{ContributorLookup, ContributorRecord, GitLogLookup, LookupError};
pub use process::{run_git, run_git_with_timeout, GitOutput};
pub use remote::{repo_root, repository_url};
