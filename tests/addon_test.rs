//! Library-level integration tests
//!
//! Each test builds its own throwaway git repository by shelling out to
//! git, then drives the addon the way a host would: setup once, hooks
//! per route.

use std::path::Path;
use std::process::Command;

use gitlog_addon::{
    AddonHooks, BuildContext, ContributorMode, ContributorOptions, GitLogAddon, GitLogOptions,
    Route,
};

fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
}

fn setup_site_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    std::fs::create_dir_all(dir.path().join("pages/blog")).unwrap();
    std::fs::write(dir.path().join("pages/index.md"), "# home").unwrap();
    std::fs::write(dir.path().join("pages/blog/a.md"), "# a").unwrap();
    git(dir.path(), &["add", "-A"]);
    git(dir.path(), &["commit", "-m", "init"]);
    dir
}

fn options(mode: ContributorMode) -> GitLogOptions {
    GitLogOptions {
        contributor: ContributorOptions {
            mode,
            log_args: String::new(),
        },
        debug: Some(false),
    }
}

#[test]
fn api_mode_decorates_paths_only() {
    let site = setup_site_repo();
    let mut addon = GitLogAddon::setup_in(options(ContributorMode::Api), site.path()).unwrap();
    addon.before_build(&BuildContext);

    let mut route = Route::for_component(site.path().join("pages/blog/a.md"));
    addon.extend_route(&mut route);

    let git_log = route.frontmatter.git_log.expect("git_log written");
    assert_eq!(git_log.path, "pages/blog/a.md");
    assert!(git_log.contributors.is_empty());
}

#[test]
fn setup_fails_outside_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    assert!(GitLogAddon::setup_in(options(ContributorMode::Api), dir.path()).is_err());
}

#[test]
fn repository_url_sentinel_is_empty_without_remote() {
    let site = setup_site_repo();
    let addon = GitLogAddon::setup_in(options(ContributorMode::Api), site.path()).unwrap();
    assert_eq!(addon.repository_url(), "");
    assert_eq!(addon.manifest().options.repository_url, "");
}

#[test]
fn repository_url_is_published_in_manifest() {
    let site = setup_site_repo();
    git(
        site.path(),
        &["remote", "add", "origin", "https://example.com/site.git"],
    );
    let addon = GitLogAddon::setup_in(options(ContributorMode::Api), site.path()).unwrap();
    assert_eq!(addon.repository_url(), "https://example.com/site.git");

    let manifest = addon.manifest();
    assert_eq!(manifest.name, "gitlog-addon");
    assert!(manifest.enable);
}

#[test]
fn log_mode_with_real_lookup_degrades_instead_of_failing() {
    // With a real tty the lookup resolves "Test User"; headless it hits
    // the tty-unavailable path and (on linux) downgrades. Either way the
    // build survives and the path is written.
    let site = setup_site_repo();
    let mut addon = GitLogAddon::setup_in(options(ContributorMode::Log), site.path()).unwrap();

    let mut route = Route::for_component(site.path().join("pages/blog/a.md"));
    addon.extend_route(&mut route);

    let git_log = route.frontmatter.git_log.expect("git_log written");
    assert_eq!(git_log.path, "pages/blog/a.md");
    for contributor in &git_log.contributors {
        assert_eq!(contributor.name, "Test User");
    }
    assert_eq!(addon.contributor_mode(), ContributorMode::Log);
}

#[test]
fn non_content_routes_survive_untouched() {
    let site = setup_site_repo();
    let mut addon = GitLogAddon::setup_in(options(ContributorMode::Log), site.path()).unwrap();
    let mut route = Route::default();
    addon.extend_route(&mut route);
    assert!(route.frontmatter.git_log.is_none());
}
