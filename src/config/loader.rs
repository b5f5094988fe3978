//! Settings resolution: defaults, `config.toml`, environment, then CLI flags.
//!
//! Each layer only overrides what it sets. A missing file is the same as an
//! empty one; a file that exists but cannot be used is an error, so a typo
//! in `config.toml` is reported instead of silently ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an alternative `config.toml`.
pub const CONFIG_ENV: &str = "COMBOBOX_CONFIG";
/// Environment variable overriding the field label.
pub const LABEL_ENV: &str = "COMBOBOX_LABEL";

const APP_DIR: &str = "combobox";
const DEFAULT_LABEL: &str = "Label";
const DEFAULT_MAX_POPUP_ROWS: u16 = 8;
const DEFAULT_MIN_WIDTH: u16 = 12;

/// Why a settings file could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured path exists but is not a regular file.
    #[error("Config path {0} is not a file")]
    NotAFile(PathBuf),

    /// The file exists but reading it failed.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// I/O error message.
        reason: String,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser message, including line and column.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Field label drawn in the control's top border.
    #[serde(default)]
    pub label: Option<String>,

    /// Option rows the popup shows before scrolling.
    #[serde(default)]
    pub max_popup_rows: Option<u16>,

    /// Narrowest the control may be, in cells.
    #[serde(default)]
    pub min_width: Option<u16>,

    /// Where tracing output is written.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Settings after every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Field label.
    pub label: String,
    /// Popup rows before scrolling; at least 1.
    pub max_popup_rows: u16,
    /// Minimum control width.
    pub min_width: u16,
    /// Log file location.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            max_popup_rows: DEFAULT_MAX_POPUP_ROWS,
            min_width: DEFAULT_MIN_WIDTH,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    fn set_max_popup_rows(&mut self, rows: u16) {
        self.max_popup_rows = rows.max(1);
    }
}

/// `<state dir>/combobox/combobox.log`, or `combobox.log` in the working
/// directory when the platform has no state dir.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join(APP_DIR).join("combobox.log"))
        .unwrap_or_else(|| PathBuf::from("combobox.log"))
}

/// `<config dir>/combobox/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Read and parse one settings file.
///
/// `Ok(None)` means the file does not exist.
///
/// # Errors
///
/// Fails when the path is a directory, cannot be read, or does not parse.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No config file");
        return Ok(None);
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let parsed = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), "Config file loaded");
    Ok(Some(parsed))
}

/// Load the settings file from the first location that is configured.
///
/// `explicit` (the `--config` flag) wins over `COMBOBOX_CONFIG`, which wins
/// over the platform default. Only the chosen location is read.
///
/// # Errors
///
/// Propagates [`load_config_file`] errors for the chosen location.
pub fn load_config_with_precedence(
    explicit: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let chosen = explicit
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(default_config_path);

    match chosen {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Layer a settings file over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    let Some(file) = config_file else {
        return config;
    };

    if let Some(label) = file.label {
        config.label = label;
    }
    if let Some(rows) = file.max_popup_rows {
        config.set_max_popup_rows(rows);
    }
    if let Some(min_width) = file.min_width {
        config.min_width = min_width;
    }
    if let Some(path) = file.log_file_path {
        config.log_file_path = path;
    }
    config
}

/// Layer `COMBOBOX_LABEL` over the config.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(label) = std::env::var(LABEL_ENV) {
        config.label = label;
    }
    config
}

/// Layer the `--label` and `--max-rows` flags over the config.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    label: Option<String>,
    max_popup_rows: Option<u16>,
) -> ResolvedConfig {
    if let Some(label) = label {
        config.label = label;
    }
    if let Some(rows) = max_popup_rows {
        config.set_max_popup_rows(rows);
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
