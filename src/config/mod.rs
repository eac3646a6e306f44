//! Configuration module for gitlog-addon
//!
//! This module handles:
//! - Addon options supplied by the host (contributor mode, log args, debug)
//! - Project-level configuration (gitlog.toml)
//! - Merge semantics between the two

mod options;

pub use options::{
    load_project_options,
    ContributorMode,
    ContributorOptions,
    GitLogOptions,
    PROJECT_CONFIG_FILE,
};
