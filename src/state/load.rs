//! Lifecycle of a lazy option fetch.

use crate::model::LoadError;

/// Lifecycle of the option fetch.
///
/// Only a lazy source leaves `Idle`:
/// `Idle → Loading → Loaded | Failed`. There is no transition out of
/// `Failed`; retrying means remounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch involved (static source) or not started.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Fetch delivered the option set.
    Loaded,
    /// Fetch failed; terminal for this mount.
    Failed(LoadError),
}

impl LoadState {
    /// True while the fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The failure, if the fetch failed.
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
