//! Fetch wire shape and the stock fetchers.
//!
//! A lazy fetch produces `{ "result": [ { "value": ..., "label": ... } ] }`.

use crate::model::{LoadError, OptionSet};
use crate::source::Fetcher;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Response of a lazy option fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// The full option set.
    pub result: OptionSet,
}

/// Parse a JSON fetch response.
///
/// # Errors
///
/// Returns `LoadError::Decode` when the payload is not the expected shape.
pub fn parse_response(json: &str) -> Result<FetchResponse, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::Decode {
        reason: e.to_string(),
    })
}

/// Fetcher that reads a JSON response file after an optional delay.
///
/// The file is read on the loader thread, never on the UI thread.
pub fn json_file_fetcher(path: PathBuf, delay: Duration) -> Fetcher {
    Box::new(move || {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        debug!(path = %path.display(), "Reading options file");
        let contents = std::fs::read_to_string(&path).map_err(|e| LoadError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        parse_response(&contents)
    })
}

/// Fetcher that resolves to a fixed option set after a delay.
///
/// Stands in for a remote endpoint when demonstrating the loading state.
pub fn delayed_fetcher(options: OptionSet, delay: Duration) -> Fetcher {
    Box::new(move || {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(FetchResponse { result: options })
    })
}
