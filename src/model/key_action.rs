//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Text editing keys (printable characters, Backspace) are not actions;
/// they feed the query text directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the highlighted row down, wrapping to the first row. Default: ↓/Ctrl+n
    FocusNext,
    /// Move the highlighted row up, wrapping to the last row. Default: ↑/Ctrl+p
    FocusPrev,
    /// Commit the highlighted row as the selection. Default: Enter
    Commit,
    /// Close the option popup without changing selection. Default: Esc
    Close,
    /// Move keyboard focus into or out of the control. Default: Tab
    ToggleFocus,
    /// Exit the application. Default: Ctrl+c/Ctrl+q
    Quit,
}

impl KeyAction {
    /// True for actions that move the highlighted row.
    pub fn is_navigation(self) -> bool {
        matches!(self, KeyAction::FocusNext | KeyAction::FocusPrev)
    }
}
