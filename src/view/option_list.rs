//! Popup option list.
//!
//! Stateless widget over the displayed options. The scroll offset is
//! computed by [`scroll_offset_for`] so the focused row stays visible, and
//! [`row_at`] maps a pointer position back to an option index for
//! activation.

use super::styles::ComboboxStyles;
use crate::model::{KeyAction, OptionSet};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block, Borders, Clear, Widget},
};

/// Text shown when the displayed list is empty.
pub const NO_MATCHES: &str = "No matches";

/// Marker in front of the selected option.
pub const SELECTED_MARKER: &str = "✓";

/// Scroll offset keeping `focused` inside a window of `visible` rows.
///
/// When the focused row is already visible the current offset is kept.
/// Otherwise the row is brought in at the top after an upward move and at
/// the bottom after any other move.
pub fn scroll_offset_for(
    focused: Option<usize>,
    current: usize,
    visible: usize,
    len: usize,
    action: Option<KeyAction>,
) -> usize {
    let max_offset = len.saturating_sub(visible);
    let Some(focused) = focused else {
        return current.min(max_offset);
    };
    if visible == 0 {
        return 0;
    }

    let offset = if focused < current || focused >= current + visible {
        match action {
            Some(KeyAction::FocusPrev) => focused,
            _ => (focused + 1).saturating_sub(visible),
        }
    } else {
        current
    };
    offset.min(max_offset)
}

/// Option index under a pointer position, if any.
///
/// The popup border is not part of any row.
pub fn row_at(popup: Rect, scroll: usize, len: usize, column: u16, row: u16) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(popup);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let index = scroll + usize::from(row - inner.y);
    (index < len).then_some(index)
}

/// Option list widget.
pub struct OptionList<'a> {
    options: &'a OptionSet,
    focused: Option<usize>,
    selected: Option<&'a str>,
    scroll: usize,
    styles: &'a ComboboxStyles,
}

impl<'a> OptionList<'a> {
    /// Create the widget for the displayed options.
    pub fn new(options: &'a OptionSet, styles: &'a ComboboxStyles) -> Self {
        Self {
            options,
            focused: None,
            selected: None,
            scroll: 0,
            styles,
        }
    }

    /// Highlighted row.
    pub fn focused(mut self, focused: Option<usize>) -> Self {
        self.focused = focused;
        self
    }

    /// Value of the committed option.
    pub fn selected(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }

    /// First visible row.
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for OptionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.popup_border);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.options.is_empty() {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                NO_MATCHES,
                usize::from(inner.width.saturating_sub(1)),
                self.styles.placeholder,
            );
            return;
        }

        let rows = self.options.iter().enumerate().skip(self.scroll);

        for (y, (index, option)) in (inner.y..inner.bottom()).zip(rows) {
            let row_style = if self.focused == Some(index) {
                self.styles.highlight
            } else {
                self.styles.text
            };
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), row_style);

            if self.selected == Some(option.value()) {
                buf.set_stringn(
                    inner.x,
                    y,
                    SELECTED_MARKER,
                    1,
                    row_style.patch(self.styles.selected_marker),
                );
            }

            buf.set_stringn(
                inner.x + 2,
                y,
                option.label(),
                usize::from(inner.width.saturating_sub(2)),
                row_style,
            );
        }
    }
}

// ===== Tests =====
