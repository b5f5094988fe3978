//! Viewport-aware popup placement.
//!
//! The direction is chosen when the popup goes closed→open (and again after a
//! resize); the height follows the displayed rows on every frame but stays on
//! the chosen side of the control.

use ratatui::layout::Rect;
use tracing::debug;

/// Side of the control the popup is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDirection {
    /// Popup hangs below the control.
    Below,
    /// Popup sits on top of the control.
    Above,
}

/// Height of the popup including its border, for `rows` displayed options.
///
/// An empty list still takes one row for its "no matches" line.
pub fn popup_natural_height(rows: usize, max_rows: u16) -> u16 {
    let visible = u16::try_from(rows).unwrap_or(u16::MAX).min(max_rows.max(1));
    visible.max(1) + 2
}

/// Choose the popup side.
///
/// Below when the whole popup fits below; otherwise above when there is more
/// room above than below; otherwise below (clipped).
pub fn choose_direction(control: Rect, viewport: Rect, natural_height: u16) -> PopupDirection {
    let space_below = viewport.bottom().saturating_sub(control.bottom());
    let space_above = control.top().saturating_sub(viewport.top());

    let direction = if natural_height <= space_below {
        PopupDirection::Below
    } else if space_above > space_below {
        PopupDirection::Above
    } else {
        PopupDirection::Below
    };

    debug!(
        space_below,
        space_above,
        natural_height,
        ?direction,
        "Chose popup direction"
    );
    direction
}

/// Popup rectangle on the given side of the control, clipped to the viewport.
pub fn popup_area(
    control: Rect,
    viewport: Rect,
    natural_height: u16,
    direction: PopupDirection,
) -> Rect {
    let width = control
        .width
        .min(viewport.right().saturating_sub(control.x));

    match direction {
        PopupDirection::Below => {
            let space = viewport.bottom().saturating_sub(control.bottom());
            Rect {
                x: control.x,
                y: control.bottom(),
                width,
                height: natural_height.min(space),
            }
        }
        PopupDirection::Above => {
            let space = control.top().saturating_sub(viewport.top());
            let height = natural_height.min(space);
            Rect {
                x: control.x,
                y: control.top() - height,
                width,
                height,
            }
        }
    }
}

/// Choose a side and compute the rectangle in one step.
pub fn place_popup(control: Rect, viewport: Rect, natural_height: u16) -> (PopupDirection, Rect) {
    let direction = choose_direction(control, viewport, natural_height);
    (
        direction,
        popup_area(control, viewport, natural_height, direction),
    )
}
