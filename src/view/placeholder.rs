//! Stand-in for the control while options are unavailable.

use super::styles::ComboboxStyles;
use crate::layout::{WidthPolicy, label_width};
use crate::state::ControlPhase;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown while the fetch is in flight.
pub const LOADING_TEXT: &str = "Loading...";
/// Shown for an empty loaded option set.
pub const NO_OPTIONS_TEXT: &str = "No options";

/// Placeholder text for a phase; `None` when the real control renders.
pub fn placeholder_text(phase: ControlPhase<'_>) -> Option<String> {
    match phase {
        ControlPhase::Loading => Some(LOADING_TEXT.to_string()),
        ControlPhase::Failed(err) => Some(format!("Failed to load options: {err}")),
        ControlPhase::Disabled => Some(NO_OPTIONS_TEXT.to_string()),
        ControlPhase::Ready => None,
    }
}

/// Width of the placeholder box: fits the text and the label title.
pub fn placeholder_width(label: &str, text: &str) -> u16 {
    label_width(text)
        .saturating_add(2)
        .max(label_width(label).saturating_add(4))
        .max(WidthPolicy::default().min_width)
}

/// Placeholder widget.
pub struct Placeholder<'a> {
    label: &'a str,
    text: &'a str,
    failed: bool,
    styles: &'a ComboboxStyles,
}

impl<'a> Placeholder<'a> {
    /// Create a placeholder with the field label as title.
    pub fn new(label: &'a str, text: &'a str, styles: &'a ComboboxStyles) -> Self {
        Self {
            label,
            text,
            failed: false,
            styles,
        }
    }

    /// Render with the error style.
    pub fn failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }
}

impl Widget for Placeholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_style: Style = if self.failed {
            self.styles.error
        } else {
            self.styles.placeholder
        };

        Paragraph::new(self.text)
            .style(text_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.styles.border_idle)
                    .title(self.label),
            )
            .render(area, buf);
    }
}
