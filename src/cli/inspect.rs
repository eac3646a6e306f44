//! Inspect command - play host for a directory
//!
//! Walks `<dir>/pages`, builds a route per markdown file, runs the
//! addon's hooks over them, and prints one JSON object per route. This
//! is the same decoration a real host would get, minus the renderer.

use anyhow::{Context, Result};
use console::style;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::addon::GitLogAddon;
use crate::config::{load_project_options, ContributorMode};
use crate::host::{AddonHooks, BuildContext};
use crate::route::Route;

pub fn run(
    dir: &Path,
    mode: Option<ContributorMode>,
    log_args: Option<String>,
    debug: bool,
) -> Result<()> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Site root {} does not exist", dir.display()))?;

    let mut options = load_project_options(&dir)?;
    if let Some(mode) = mode {
        options.contributor.mode = mode;
    }
    if let Some(log_args) = log_args {
        options.contributor.log_args = log_args;
    }
    if debug {
        options.debug = Some(true);
    }

    let mut addon = GitLogAddon::setup_in(options, &dir)?;
    addon.before_build(&BuildContext);

    let manifest = addon.manifest();
    eprintln!(
        "{} v{} ({})",
        style(&manifest.name).yellow(),
        manifest.version,
        if manifest.options.repository_url.is_empty() {
            "no remote".to_string()
        } else {
            manifest.options.repository_url.clone()
        }
    );

    let pages = dir.join("pages");
    if !pages.is_dir() {
        anyhow::bail!("{} has no pages/ directory", dir.display());
    }

    for page in markdown_pages(&pages) {
        let mut route = Route::for_component(page);
        addon.extend_route(&mut route);
        let line = serde_json::json!({
            "component": route.component,
            "frontmatter": route.frontmatter,
        });
        println!("{line}");
    }

    Ok(())
}

/// Markdown files under `pages`, .gitignore-aware, stable order.
fn markdown_pages(pages: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(pages)
        .hidden(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == "md" || ext == "markdown")
        })
        .collect();
    files.sort();
    files
}
