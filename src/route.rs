//! Route and frontmatter model
//!
//! The host owns routes; the addon only reads the resolved component
//! path and writes the `git_log` frontmatter block. Host-owned
//! frontmatter keys pass through untouched via a flattened map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::git::ContributorRecord;

/// Git metadata written into a route's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitLogMeta {
    /// File path relative to the repository root.
    pub path: String,
    /// Ordered contributor list, insertion order = discovery order.
    /// Duplicates are allowed; no de-duplication is performed here.
    #[serde(default)]
    pub contributors: Vec<ContributorRecord>,
}

/// Structured metadata attached to a content page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// The addon's block. Absent until the decorator first visits the
    /// route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_log: Option<GitLogMeta>,

    /// Everything else in the page's frontmatter, owned by the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Frontmatter {
    /// The `git_log` block, initialized on first access.
    pub fn git_log_mut(&mut self) -> &mut GitLogMeta {
        self.git_log.get_or_insert_with(GitLogMeta::default)
    }
}

/// A discovered content route as handed to the addon by the host.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Resolved default-component file path; `None` for non-content
    /// routes (the decorator skips those entirely).
    pub component: Option<PathBuf>,
    /// Mutable frontmatter, decorated in place.
    pub frontmatter: Frontmatter,
}

impl Route {
    /// Route for a content page backed by a file.
    pub fn for_component(component: impl Into<PathBuf>) -> Self {
        Self {
            component: Some(component.into()),
            frontmatter: Frontmatter::default(),
        }
    }
}
