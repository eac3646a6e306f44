//! Host plugin contract
//!
//! The addon cannot run on its own: a host framework discovers routes,
//! drives the build, and calls the hooks below at its documented
//! extension points. The companion `inspect` command doubles as a tiny
//! host for debugging.

use serde::Serialize;

use crate::config::GitLogOptions;
use crate::route::Route;

/// Hooks a host dispatches into the addon.
///
/// Invocation order across routes is host-controlled; the addon only
/// relies on hooks being called from a single thread.
pub trait AddonHooks {
    /// Fired once before the build starts. Diagnostic only.
    fn before_build(&mut self, ctx: &BuildContext);

    /// Fired once per discovered route. Decorates the route in place.
    fn extend_route(&mut self, route: &mut Route);
}

/// Addon registration data the host exposes to the site.
#[derive(Debug, Clone, Serialize)]
pub struct AddonManifest {
    /// Registered addon name, from package metadata.
    pub name: String,
    /// Addon version, from package metadata.
    pub version: String,
    /// Whether the addon is active.
    pub enable: bool,
    /// Merged options as published to the site.
    pub options: ManifestOptions,
}

/// Options block of the manifest: the user-facing options plus the
/// derived repository URL (not user-settable).
#[derive(Debug, Clone, Serialize)]
pub struct ManifestOptions {
    #[serde(flatten)]
    pub options: GitLogOptions,
    /// Remote origin URL; empty string when unknown.
    pub repository_url: String,
}

/// Context handed to `before_build`.
#[derive(Debug, Clone, Default)]
pub struct BuildContext;
