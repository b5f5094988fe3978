//! Combobox state machine (pure).
//!
//! All state transitions are plain method calls testable without a TUI.
//! The only impure piece is the lazy fetch, which runs on a loader thread
//! and is applied through `ComboboxController::poll_load`.

pub mod controller;
pub mod filter;
pub mod load;
pub mod navigation;

// Re-export for convenience
pub use controller::{
    ChangeEvent, ChangeHandler, ComboboxController, ComboboxProps, ControlPhase, ControllerState,
    ViewMode,
};
pub use filter::filter_options;
pub use load::LoadState;
pub use navigation::{next_index, prev_index};
