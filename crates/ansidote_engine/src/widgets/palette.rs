use image::RgbImage;

use super::{SelectOutcome, BACKGROUND_COLOR, FOREGROUND_MARKER_COLOR, MARKER_COLOR};
use crate::{
    geometry::PaletteGeometry,
    surface::{draw_rect_outline, fill_rect, new_surface},
    Color, PaletteData, Position,
};

/// Color picker with independent foreground and background selections.
///
/// Cells are sized so that all palette entries fit into the container,
/// the last row may be partially filled.
pub struct Palette {
    width: u32,
    height: u32,
    colors: PaletteData,
    geometry: PaletteGeometry,
    marker_fg: Position,
    marker_bg: Position,
    selected_fg: Color,
    selected_bg: Color,
    surface: RgbImage,
}

impl Palette {
    pub fn new(width: u32, height: u32, colors: PaletteData) -> Self {
        let mut palette = Self {
            width,
            height,
            geometry: PaletteGeometry::new(width, height, colors.len()),
            colors,
            marker_fg: Position::default(),
            marker_bg: Position::default(),
            selected_fg: Color::BLACK,
            selected_bg: Color::BLACK,
            surface: RgbImage::new(0, 0),
        };
        palette.redraw();
        palette
    }

    /// Recomputes the layout and repaints the whole surface.
    pub fn redraw(&mut self) {
        self.geometry = PaletteGeometry::new(self.width, self.height, self.colors.len());
        let geometry = self.geometry;
        let mut surface = new_surface(geometry.surface_width(), self.height, BACKGROUND_COLOR);

        for row in 0..geometry.rows {
            let (y0, y1) = geometry.span(row);
            for column in 0..geometry.columns {
                let Some(color) = self.colors.get(row * geometry.columns + column) else {
                    continue;
                };
                let (x0, x1) = geometry.span(column);
                let (x, y, w, h) = (x0 as i32, y0 as i32, x1 - x0, y1 - y0);
                fill_rect(&mut surface, x, y, w, h, color);

                let pos = Position::from((column, row));
                if pos == self.marker_bg {
                    draw_rect_outline(&mut surface, x, y, w, h, MARKER_COLOR);
                } else if pos == self.marker_fg {
                    draw_rect_outline(&mut surface, x, y, w, h, FOREGROUND_MARKER_COLOR);
                }
            }
        }
        self.surface = surface;
    }

    /// Picks the color in cell `(x, y)` as foreground or background color.
    ///
    /// Cells outside of the grid or past the last entry are ignored.
    /// `x >= columns` counts as outside even when the linear index would
    /// still hit an entry, a click never wraps into the next row.
    pub fn select(&mut self, x: i32, y: i32, is_foreground: bool) -> SelectOutcome {
        let pos = Position::new(x, y);
        let Some(color) = pos.linear_index(self.geometry.columns).and_then(|i| self.colors.get(i)) else {
            log::trace!("palette: ignoring selection at {pos}");
            return SelectOutcome::Ignored;
        };
        if is_foreground {
            self.selected_fg = color;
            self.marker_fg = pos;
        } else {
            self.selected_bg = color;
            self.marker_bg = pos;
        }
        log::debug!(
            "palette: selected {} {} at {pos}",
            if is_foreground { "foreground" } else { "background" },
            color.to_hex()
        );
        self.redraw();
        SelectOutcome::Selected
    }

    /// Grid cell under the pixel `(px, py)` of the surface.
    pub fn cell_at(&self, px: i32, py: i32) -> Position {
        self.geometry.cell_at(px, py)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_edge(&self) -> f64 {
        self.geometry.cell_edge
    }

    pub fn columns(&self) -> usize {
        self.geometry.columns
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn selected_foreground(&self) -> Color {
        self.selected_fg
    }

    pub fn selected_background(&self) -> Color {
        self.selected_bg
    }

    pub fn marker_foreground(&self) -> Position {
        self.marker_fg
    }

    pub fn marker_background(&self) -> Position {
        self.marker_bg
    }

    pub fn colors(&self) -> &PaletteData {
        &self.colors
    }

    pub fn surface(&self) -> &RgbImage {
        &self.surface
    }
}
