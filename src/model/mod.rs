//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod option;

// Re-export for convenience
pub use error::{AppError, EmptyOptionSet, LoadError};
pub use key_action::KeyAction;
pub use option::{Activation, OptionSet, SelectOption};
