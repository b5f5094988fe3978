//! combobox
//!
//! Searchable dropdown selector for terminal UIs.
//!
//! The crate follows a Pure Core / Impure Shell split:
//! - [`model`], [`state`] and [`layout`] are pure: option data, the
//!   combobox state machine, filtering, navigation and geometry.
//! - [`source`] runs the lazy option fetch on a loader thread.
//! - [`view`] owns the terminal: widgets, hit-testing and the event loop.
//! - [`config`] and [`logging`] are the ambient shell.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
