//! Geometry policy (pure).
//!
//! Control width derived from the full option set, and popup placement derived
//! from the control's position within the viewport.

pub mod placement;
pub mod width;

pub use placement::{
    PopupDirection, choose_direction, place_popup, popup_area, popup_natural_height,
};
pub use width::{
    AFFORDANCE_COLS, BORDER_COLS, CURSOR_COLS, WidthPolicy, control_width, label_width,
};
