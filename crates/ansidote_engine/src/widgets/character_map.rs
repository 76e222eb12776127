use image::RgbImage;

use super::{SelectOutcome, BACKGROUND_COLOR, GLYPH_COLOR, MARKER_COLOR};
use crate::{
    geometry::CharacterMapGeometry,
    surface::{blit, draw_rect_outline, new_surface},
    GlyphFont, GlyphSet, Position,
};

/// Glyph picker. Lays the glyph set out in square cells, row by row, and
/// keeps track of one selected glyph.
pub struct CharacterMap<'a> {
    width: u32,
    height: u32,
    font: &'a dyn GlyphFont,
    glyphs: GlyphSet,
    geometry: CharacterMapGeometry,
    selected_index: Position,
    selected_glyph: char,
    surface: RgbImage,
}

impl<'a> CharacterMap<'a> {
    pub fn new(width: u32, height: u32, font: &'a dyn GlyphFont, glyphs: GlyphSet) -> Self {
        let (advance, _) = font.size_of(" ");
        let geometry = CharacterMapGeometry::new(width, advance);
        log::debug!(
            "character map {width}x{height}: {} columns, cell size {}, {} glyphs",
            geometry.columns,
            geometry.cell_size,
            glyphs.len()
        );
        let mut map = Self {
            width,
            height,
            font,
            glyphs,
            geometry,
            selected_index: Position::default(),
            selected_glyph: ' ',
            surface: RgbImage::new(0, 0),
        };
        map.redraw();
        map
    }

    /// Repaints the whole surface from the current selection.
    pub fn redraw(&mut self) {
        let mut surface = new_surface(self.width, self.height, BACKGROUND_COLOR);
        let cell_size = self.geometry.cell_size;

        for (i, ch) in self.glyphs.iter().enumerate() {
            let pos = Position::from_linear_index(i, self.geometry.columns);
            let (x, y) = self.geometry.cell_origin(pos);

            let image = self.font.render(&format!("{ch} "), GLYPH_COLOR);
            blit(&mut surface, &image, x + (cell_size / 4) as i32, y);

            if pos == self.selected_index {
                draw_rect_outline(&mut surface, x, y, cell_size, cell_size, MARKER_COLOR);
            }
        }
        self.surface = surface;
    }

    /// Selects the glyph in cell `(x, y)`.
    ///
    /// Cells outside of the grid or past the end of the glyph set are ignored.
    /// `x >= columns` counts as outside even when the linear index would
    /// still hit an entry, a click never wraps into the next row.
    pub fn select(&mut self, x: i32, y: i32) -> SelectOutcome {
        let pos = Position::new(x, y);
        let Some(ch) = pos.linear_index(self.geometry.columns).and_then(|i| self.glyphs.get(i)) else {
            log::trace!("character map: ignoring selection at {pos}");
            return SelectOutcome::Ignored;
        };
        self.selected_index = pos;
        self.selected_glyph = ch;
        log::debug!("character map: selected {ch:?} at {pos}");
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

    pub fn columns(&self) -> usize {
        self.geometry.columns
    }

    /// Rows needed to show the whole glyph set.
    pub fn rows(&self) -> usize {
        self.geometry.rows(self.glyphs.len())
    }

    pub fn cell_size(&self) -> u32 {
        self.geometry.cell_size
    }

    pub fn selected_index(&self) -> Position {
        self.selected_index
    }

    pub fn selected_glyph(&self) -> char {
        self.selected_glyph
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    pub fn surface(&self) -> &RgbImage {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbaImage};

    use super::*;
    use crate::Color;

    /// Every glyph is a filled 10x10 block, spaces are blank.
    struct BlockFont;

    impl GlyphFont for BlockFont {
        fn name(&self) -> &str {
            "block"
        }

        fn size_of(&self, text: &str) -> (u32, u32) {
            (text.chars().count() as u32 * 10, 10)
        }

        fn render(&self, text: &str, color: Color) -> RgbaImage {
            let (w, h) = self.size_of(text);
            let mut image = RgbaImage::new(w, h);
            for (i, ch) in text.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                for y in 0..h {
                    for x in 0..10 {
                        image.put_pixel(i as u32 * 10 + x, y, image::Rgba([color.r, color.g, color.b, 255]));
                    }
                }
            }
            image
        }
    }

    #[test]
    fn test_construction() {
        let map = CharacterMap::new(560, 200, &BlockFont, GlyphSet::default());
        assert_eq!(map.columns(), 56);
        assert_eq!(map.cell_size(), 10);
        assert_eq!(map.rows(), 5);
        assert_eq!(map.selected_index(), Position::new(0, 0));
        assert_eq!(map.selected_glyph(), ' ');
        assert_eq!(map.surface().dimensions(), (560, 200));
    }

    #[test]
    fn test_initial_marker_drawn() {
        let map = CharacterMap::new(100, 50, &BlockFont, GlyphSet::from(" AB"));
        let green: Rgb<u8> = MARKER_COLOR.into();
        let background: Rgb<u8> = BACKGROUND_COLOR.into();
        assert_eq!(map.surface().get_pixel(0, 0), &green);
        assert_eq!(map.surface().get_pixel(9, 9), &green);
        assert_eq!(map.surface().get_pixel(5, 5), &background);
    }

    #[test]
    fn test_glyph_offset_by_quarter_cell() {
        let map = CharacterMap::new(100, 50, &BlockFont, GlyphSet::from(" A"));
        let glyph: Rgb<u8> = GLYPH_COLOR.into();
        let background: Rgb<u8> = BACKGROUND_COLOR.into();
        // cell 1 starts at x=10, glyph at x=12 (cell_size / 4 == 2)
        assert_eq!(map.surface().get_pixel(11, 5), &background);
        assert_eq!(map.surface().get_pixel(12, 5), &glyph);
        assert_eq!(map.surface().get_pixel(21, 5), &glyph);
    }

    #[test]
    fn test_select_moves_marker() {
        let mut map = CharacterMap::new(100, 50, &BlockFont, GlyphSet::from(" ABCDEFGHIJKLMN"));
        assert_eq!(map.select(2, 1), SelectOutcome::Selected);
        assert_eq!(map.selected_index(), Position::new(2, 1));
        assert_eq!(map.selected_glyph(), 'L');

        let green: Rgb<u8> = MARKER_COLOR.into();
        assert_eq!(map.surface().get_pixel(20, 10), &green);
        assert_ne!(map.surface().get_pixel(0, 0), &green);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut map = CharacterMap::new(100, 50, &BlockFont, GlyphSet::from(" ABC"));
        let before = map.surface().clone();
        assert_eq!(map.select(4, 0), SelectOutcome::Ignored);
        assert_eq!(map.select(0, 1), SelectOutcome::Ignored);
        assert_eq!(map.select(-1, 0), SelectOutcome::Ignored);
        assert_eq!(map.select(10, 0), SelectOutcome::Ignored);
        assert_eq!(map.selected_index(), Position::new(0, 0));
        assert_eq!(map.selected_glyph(), ' ');
        assert_eq!(map.surface(), &before);
    }
}
