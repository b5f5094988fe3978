//! Dynamic control width.
//!
//! The control is sized to the widest label across the *full* option set so
//! that no option is truncated once selected, whatever the current filter.

use crate::model::{EmptyOptionSet, OptionSet};
use unicode_width::UnicodeWidthStr;

/// Left and right border cells.
pub const BORDER_COLS: u16 = 2;
/// Cell reserved for the text cursor after the query.
pub const CURSOR_COLS: u16 = 1;
/// Clear and chevron affordances, each preceded by a space: ` × ▾`.
pub const AFFORDANCE_COLS: u16 = 4;

/// Sizing policy for the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPolicy {
    /// Cells added around the longest label.
    pub chrome: u16,
    /// Lower bound on the resulting width.
    pub min_width: u16,
}

impl Default for WidthPolicy {
    fn default() -> Self {
        Self {
            chrome: BORDER_COLS + CURSOR_COLS + AFFORDANCE_COLS,
            min_width: 12,
        }
    }
}

impl WidthPolicy {
    /// Default chrome with a custom minimum width.
    pub fn with_min_width(min_width: u16) -> Self {
        Self {
            min_width,
            ..Self::default()
        }
    }
}

/// Display width of a label in terminal cells.
///
/// Uses `unicode-width`, so wide glyphs count as two cells.
pub fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

/// Width of the control for the given options.
///
/// # Errors
///
/// Returns [`EmptyOptionSet`] when there is no label to measure.
pub fn control_width(options: &OptionSet, policy: &WidthPolicy) -> Result<u16, EmptyOptionSet> {
    let longest = options
        .iter()
        .map(|option| label_width(option.label()))
        .max()
        .ok_or(EmptyOptionSet)?;

    Ok(longest.saturating_add(policy.chrome).max(policy.min_width))
}
