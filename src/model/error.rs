//! Error types for the combobox.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions into [`AppError`] at the binary boundary.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the `combobox` binary
//!   - [`ConfigError`] - Config file could not be read or parsed
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`LoadError`] - Lazy option fetch failed. Never propagated: captured into
//!   `LoadState::Failed` and rendered as a placeholder.
//! - [`EmptyOptionSet`] - Width or wraparound requested over zero options.
//!   Guarded: an empty set yields a disabled control.
//!
//! # Error Recovery Strategy
//!
//! Load failure is terminal for a mount. There is no automatic retry; the
//! host remounts the controller to try again.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to install the tracing subscriber.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// This indicates failures in the crossterm/ratatui layer. Fatal: the
    /// terminal is restored and the error is written to stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of a lazy option fetch.
///
/// Stored inside `LoadState::Failed`, so it is `Clone` and comparable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The options file could not be read.
    #[error("Failed to read options from {path}: {reason}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The fetched payload is not shaped as `{ "result": [ {value, label} ] }`.
    #[error("Invalid options payload: {reason}")]
    Decode {
        /// Deserialization error details.
        reason: String,
    },

    /// The fetch itself reported failure.
    #[error("Option fetch failed: {0}")]
    Fetch(String),

    /// The loader thread could not be started.
    #[error("Failed to start option loader: {0}")]
    Spawn(String),

    /// The loader thread ended without delivering a result.
    #[error("Option loader stopped before delivering a result")]
    Disconnected,
}

/// Width or wraparound requested over an empty option set.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Option set is empty")]
pub struct EmptyOptionSet;
