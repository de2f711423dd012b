//! Execution mode.

use std::fmt;

/// Whether a run may touch the outside world.
///
/// Decided once at startup and handed by value to every component that spawns
/// processes or locates artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Commands run and artifacts are edited in place.
    #[default]
    Normal,
    /// Commands are only logged and artifacts are edited through shadow copies.
    DryRun,
}

impl RunMode {
    /// Maps a `--dry-run` flag to a mode.
    #[must_use]
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Normal }
    }

    /// Returns true in dry-run mode.
    #[must_use]
    pub fn is_dry_run(self) -> bool {
        self == Self::DryRun
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::DryRun => write!(f, "dry-run"),
        }
    }
}
