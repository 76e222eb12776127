//! Selection widgets that render a grid of cells into an offscreen surface.

use crate::Color;

mod character_map;
pub use character_map::*;

mod palette;
pub use palette::*;

pub const BACKGROUND_COLOR: Color = Color::new(30, 35, 40);
pub const GLYPH_COLOR: Color = Color::new(180, 180, 180);
/// Outline of the selected glyph and of the background color marker.
pub const MARKER_COLOR: Color = Color::new(0, 255, 0);
pub const FOREGROUND_MARKER_COLOR: Color = Color::new(0, 0, 255);

/// Result of a `select` call.
///
/// Selecting a cell outside of the populated grid is not an error, pointer
/// math may overshoot the last (partial) row. Such requests are ignored and
/// leave the widget untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Ignored,
}

impl SelectOutcome {
    pub fn is_selected(self) -> bool {
        self == SelectOutcome::Selected
    }
}
