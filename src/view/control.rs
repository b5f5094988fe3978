//! The combobox control: label, query input and affordances.
//!
//! Inner row layout (right edge shown):
//!
//! ```text
//! │query▏ × ▾│
//! ```
//!
//! The clear glyph sits four columns left of the right edge and only shows
//! with a selection; the chevron sits two columns left of it.

use super::styles::ComboboxStyles;
use crate::layout::{AFFORDANCE_COLS, CURSOR_COLS};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Glyph for the clear affordance.
pub const CLEAR_GLYPH: &str = "×";
/// Glyph for the open affordance (popup closed).
pub const OPEN_GLYPH: &str = "▾";
/// Glyph for the collapse affordance (popup open).
pub const COLLAPSE_GLYPH: &str = "▴";

/// Part of the control under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    /// The clear glyph.
    Clear,
    /// The chevron while the popup is closed.
    Open,
    /// The chevron while the popup is open.
    Collapse,
    /// Anywhere else inside the control.
    Surface,
}

/// Column of the chevron glyph for a control rectangle.
fn chevron_column(area: Rect) -> u16 {
    area.right().saturating_sub(2)
}

/// Column of the clear glyph for a control rectangle.
fn clear_column(area: Rect) -> u16 {
    area.right().saturating_sub(4)
}

/// Hit-test a pointer position against the control.
///
/// Returns `None` when the position is outside `area`.
pub fn control_hit(
    area: Rect,
    column: u16,
    row: u16,
    has_selection: bool,
    is_open: bool,
) -> Option<ControlHit> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }

    let input_row = area.y.saturating_add(1);
    if row == input_row && area.width > AFFORDANCE_COLS + 1 {
        if column == chevron_column(area) {
            return Some(if is_open {
                ControlHit::Collapse
            } else {
                ControlHit::Open
            });
        }
        if has_selection && column == clear_column(area) {
            return Some(ControlHit::Clear);
        }
    }

    Some(ControlHit::Surface)
}

/// Longest suffix of `text` that fits in `width` columns.
fn visible_tail(text: &str, width: u16) -> &str {
    let mut used = 0u16;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = u16::try_from(ch.width().unwrap_or(0)).unwrap_or(u16::MAX);
        if used.saturating_add(w) > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Control widget.
pub struct ControlView<'a> {
    label: &'a str,
    query: &'a str,
    focused: bool,
    hovered: bool,
    open: bool,
    has_selection: bool,
    styles: &'a ComboboxStyles,
}

impl<'a> ControlView<'a> {
    /// Create the widget for a label and query text.
    pub fn new(label: &'a str, query: &'a str, styles: &'a ComboboxStyles) -> Self {
        Self {
            label,
            query,
            focused: false,
            hovered: false,
            open: false,
            has_selection: false,
            styles,
        }
    }

    /// Input has focus (cursor shown, focus border).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Pointer is over the control.
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    /// Popup is open (chevron points up).
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// A selection is locked (clear glyph shown).
    pub fn has_selection(mut self, has_selection: bool) -> Self {
        self.has_selection = has_selection;
        self
    }
}

impl Widget for ControlView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.control_border(self.focused, self.hovered))
            .title(self.label);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let text_width = inner.width.saturating_sub(AFFORDANCE_COLS + CURSOR_COLS);
        let shown = visible_tail(self.query, text_width);
        let (end_x, _) = buf.set_stringn(
            inner.x,
            inner.y,
            shown,
            usize::from(text_width),
            self.styles.text,
        );

        if self.focused && end_x < inner.right() {
            if let Some(cell) = buf.cell_mut((end_x, inner.y)) {
                cell.set_symbol(" ").set_style(self.styles.cursor);
            }
        }

        if inner.width < AFFORDANCE_COLS {
            return;
        }

        let chevron = if self.open {
            COLLAPSE_GLYPH
        } else {
            OPEN_GLYPH
        };
        if let Some(cell) = buf.cell_mut((chevron_column(area), inner.y)) {
            cell.set_symbol(chevron).set_style(self.styles.affordance);
        }

        if self.has_selection {
            if let Some(cell) = buf.cell_mut((clear_column(area), inner.y)) {
                cell.set_symbol(CLEAR_GLYPH)
                    .set_style(self.styles.affordance);
            }
        }
    }
}

// ===== Tests =====
