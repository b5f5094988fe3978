//! Combobox styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors forced on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ComboboxStyles =====

/// Styles for the control, popup and placeholders.
///
/// Without colors, state is still distinguishable through modifiers
/// (bold focus border, reversed highlight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboboxStyles {
    /// Control border while the input has focus.
    pub border_focused: Style,
    /// Control border while the pointer is over it.
    pub border_hovered: Style,
    /// Control border otherwise.
    pub border_idle: Style,
    /// Query text.
    pub text: Style,
    /// Text cursor cell.
    pub cursor: Style,
    /// Clear and open/collapse glyphs.
    pub affordance: Style,
    /// Popup border.
    pub popup_border: Style,
    /// Highlighted (focused) row.
    pub highlight: Style,
    /// Marker on the selected row.
    pub selected_marker: Style,
    /// Loading and empty placeholders.
    pub placeholder: Style,
    /// Load failure placeholder.
    pub error: Style,
}

impl ComboboxStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                border_focused: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                border_hovered: Style::default().fg(Color::White),
                border_idle: Style::default().fg(Color::DarkGray),
                text: Style::default(),
                cursor: Style::default().bg(Color::White).fg(Color::Black),
                affordance: Style::default().fg(Color::Gray),
                popup_border: Style::default().fg(Color::Cyan),
                highlight: Style::default().bg(Color::Blue).fg(Color::White),
                selected_marker: Style::default().fg(Color::Green),
                placeholder: Style::default().fg(Color::Gray),
                error: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                border_focused: Style::default().add_modifier(Modifier::BOLD),
                border_hovered: Style::default(),
                border_idle: Style::default(),
                text: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                affordance: Style::default(),
                popup_border: Style::default(),
                highlight: Style::default().add_modifier(Modifier::REVERSED),
                selected_marker: Style::default(),
                placeholder: Style::default(),
                error: Style::default(),
            }
        }
    }

    /// Border style for the control's interaction state.
    ///
    /// Focus wins over hover.
    pub fn control_border(&self, focused: bool, hovered: bool) -> Style {
        if focused {
            self.border_focused
        } else if hovered {
            self.border_hovered
        } else {
            self.border_idle
        }
    }
}

impl Default for ComboboxStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    fn focus_wins_over_hover() {
        let styles = ComboboxStyles::with_color_config(ColorConfig::fixed(true));
        assert_eq!(styles.control_border(true, true), styles.border_focused);
        assert_eq!(styles.control_border(false, true), styles.border_hovered);
        assert_eq!(styles.control_border(false, false), styles.border_idle);
    }

    #[test]
    fn monochrome_styles_have_no_colors() {
        let styles = ComboboxStyles::with_color_config(ColorConfig::fixed(false));
        assert_eq!(styles.highlight.fg, None);
        assert_eq!(styles.highlight.bg, None);
        assert!(styles.highlight.add_modifier.contains(Modifier::REVERSED));
    }
}
