//! Contributor mode controller
//!
//! The only stateful piece of the addon: holds the active contributor
//! mode and applies the single one-way transition. A tty-unavailable
//! lookup failure on Linux permanently moves the mode to `log`; every
//! other failure leaves it alone.
//!
//! The transition target matches the long-observed behavior of the
//! addon even where it looks inverted (a missing tty is a problem for
//! the log-based lookup specifically). Changing the target is a product
//! decision; a regression test pins the current one.

use tracing::{error, warn};

use crate::config::ContributorMode;
use crate::git::LookupError;

/// Platform family, injectable so the Linux-only transition is testable
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
    Other,
}

impl Platform {
    /// Platform the process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// Path addressing the controlling terminal on this platform.
    pub fn tty_device(&self) -> &'static str {
        match self {
            Platform::Windows => "CON",
            _ => "/dev/tty",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Other => "other",
        }
    }
}

/// Outcome of feeding a lookup failure to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDisposition {
    /// The mode was (re)set to `log`; all subsequent routes see it.
    Downgraded,
    /// Generic failure; the mode is unchanged.
    Unchanged,
}

/// State machine over `{ api, log }` with exactly one one-way transition.
#[derive(Debug)]
pub struct ModeController {
    mode: ContributorMode,
    platform: Platform,
}

impl ModeController {
    pub fn new(initial: ContributorMode, platform: Platform) -> Self {
        Self {
            mode: initial,
            platform,
        }
    }

    /// The active mode, observed by every route visit.
    pub fn mode(&self) -> ContributorMode {
        self.mode
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Apply the transition rule for a failed lookup.
    ///
    /// Linux + tty-unavailable downgrades the mode to `log`, globally
    /// and stickily. Anything else is logged and absorbed.
    pub fn note_failure(&mut self, err: &LookupError) -> FailureDisposition {
        match err {
            LookupError::TtyUnavailable { device } if self.platform == Platform::Linux => {
                warn!("The path {device} does not exist");
                self.mode = ContributorMode::Log;
                FailureDisposition::Downgraded
            }
            other => {
                error!("{other}");
                FailureDisposition::Unchanged
            }
        }
    }
}
