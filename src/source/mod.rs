//! Option sources.
//!
//! This module provides the two ways a combobox receives its options:
//! - A static option set, ingested synchronously on mount
//! - A lazy fetch, run once on a loader thread and polled from the UI loop
//!
//! The loader delivers exactly one [`LoadCompletion`] tagged with the
//! [`MountId`] it was started for, so a result can never be applied to a
//! different mount.

use crate::model::{LoadError, OptionSet};
use crate::source::fetch::FetchResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;
use tracing::{debug, warn};

pub mod fetch;
pub mod films;

/// Deferred option fetch, run once off the UI thread.
pub type Fetcher = Box<dyn FnOnce() -> Result<FetchResponse, LoadError> + Send + 'static>;

/// Where a combobox gets its options.
///
/// Sum type enforces exactly one variant.
pub enum OptionSource {
    /// Fixed option set, available immediately.
    Static(OptionSet),
    /// Asynchronous fetch producing the option set once.
    Lazy(Fetcher),
}

impl OptionSource {
    /// True for the asynchronous variant.
    pub fn is_lazy(&self) -> bool {
        matches!(self, OptionSource::Lazy(_))
    }
}

impl std::fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSource::Static(options) => {
                f.debug_tuple("Static").field(&options.len()).finish()
            }
            OptionSource::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<OptionSet> for OptionSource {
    fn from(options: OptionSet) -> Self {
        OptionSource::Static(options)
    }
}

/// Identity of one controller mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    /// Allocate an id unique within the process.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Outcome of a lazy fetch, addressed to the mount that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCompletion {
    /// Mount the fetch was started for.
    pub mount_id: MountId,
    /// Fetched options or the failure.
    pub result: Result<OptionSet, LoadError>,
}

/// Receiving end of a running fetch.
///
/// Dropping the handle (unmount) drops the receiver; the loader thread's send
/// then fails and the result is discarded.
#[derive(Debug)]
pub struct LoadHandle {
    mount_id: MountId,
    rx: Receiver<LoadCompletion>,
}

impl LoadHandle {
    /// Start the fetch on a named loader thread.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Spawn` if the thread cannot be created.
    pub fn spawn(mount_id: MountId, fetcher: Fetcher) -> Result<Self, LoadError> {
        let (tx, rx) = mpsc::channel();

        std::thread::Builder::new()
            .name(format!("option-loader-{}", mount_id.get()))
            .spawn(move || {
                let result = fetcher().map(|response| response.result);
                if tx.send(LoadCompletion { mount_id, result }).is_err() {
                    debug!(
                        mount_id = mount_id.get(),
                        "Mount is gone, discarding fetched options"
                    );
                }
            })
            .map_err(|e| LoadError::Spawn(e.to_string()))?;

        Ok(Self { mount_id, rx })
    }

    /// Mount this fetch belongs to.
    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    /// Non-blocking check for the completion.
    ///
    /// Returns `None` while the fetch is still running. A loader that exits
    /// without sending (e.g. the fetcher panicked) yields
    /// `LoadError::Disconnected`.
    pub fn try_take(&self) -> Option<LoadCompletion> {
        match self.rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.disconnected()),
        }
    }

    /// Block up to `timeout` for the completion.
    pub fn wait(&self, timeout: Duration) -> Option<LoadCompletion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.disconnected()),
        }
    }

    fn disconnected(&self) -> LoadCompletion {
        warn!(
            mount_id = self.mount_id.get(),
            "Option loader exited without a result"
        );
        LoadCompletion {
            mount_id: self.mount_id,
            result: Err(LoadError::Disconnected),
        }
    }
}
