//! Grid layout of the picker widgets.
//!
//! Everything in here is a pure function of the current dimensions and the
//! number of items, the widgets recompute it on every redraw instead of
//! caching derived fields.

use crate::Position;

/// Layout of the character map: square cells, fixed column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterMapGeometry {
    pub columns: usize,
    /// Edge length of a square cell in pixels.
    pub cell_size: u32,
}

impl CharacterMapGeometry {
    /// Computes the layout for a map `width` pixels wide where one glyph
    /// advances `glyph_advance` pixels.
    pub fn new(width: u32, glyph_advance: u32) -> Self {
        let columns = (width / glyph_advance.max(1)).max(1) as usize;
        let cell_size = (width as f64 / columns as f64).round_ties_even() as u32;
        Self { columns, cell_size }
    }

    pub fn rows(&self, count: usize) -> usize {
        rows_for(count, self.columns)
    }

    /// Top left pixel of the cell at `pos`.
    pub fn cell_origin(&self, pos: Position) -> (i32, i32) {
        (pos.x * self.cell_size as i32, pos.y * self.cell_size as i32)
    }

    /// Grid cell containing the pixel `(px, py)`.
    pub fn cell_at(&self, px: i32, py: i32) -> Position {
        let size = self.cell_size.max(1) as i32;
        Position::new(px.div_euclid(size), py.div_euclid(size))
    }
}

/// Layout of the palette: roughly square cells sized so that all entries
/// pack into the container area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteGeometry {
    /// Edge length of a cell in (fractional) pixels.
    pub cell_edge: f64,
    pub columns: usize,
    pub rows: usize,
}

impl PaletteGeometry {
    pub fn new(width: u32, height: u32, count: usize) -> Self {
        if count == 0 {
            return Self {
                cell_edge: 0.0,
                columns: 0,
                rows: 0,
            };
        }
        let cell_edge = (width as f64 * height as f64 / count as f64).sqrt();
        let columns = if cell_edge > 0.0 {
            ((width as f64 / cell_edge).round_ties_even() as usize).max(1)
        } else {
            1
        };
        Self {
            cell_edge,
            columns,
            rows: rows_for(count, columns),
        }
    }

    /// Width of the rendered surface, `columns * cell_edge` truncated.
    pub fn surface_width(&self) -> u32 {
        (self.columns as f64 * self.cell_edge) as u32
    }

    /// Pixel span `[start, end)` of the cell with the given column or row
    /// number. Neighbouring spans touch, so cells never leave gaps.
    pub fn span(&self, n: usize) -> (u32, u32) {
        let start = (n as f64 * self.cell_edge) as u32;
        let end = ((n + 1) as f64 * self.cell_edge) as u32;
        (start, end)
    }

    /// Grid cell containing the pixel `(px, py)`.
    pub fn cell_at(&self, px: i32, py: i32) -> Position {
        if self.cell_edge <= 0.0 {
            return Position::default();
        }
        Position::new((px as f64 / self.cell_edge).floor() as i32, (py as f64 / self.cell_edge).floor() as i32)
    }
}

/// Number of rows needed for `count` items in rows of `columns`: the full
/// rows, plus one if a nonzero remainder is left over.
pub fn rows_for(count: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    let mut rows = count / columns;
    if count - rows * columns > 0 {
        rows += 1;
    }
    rows
}
