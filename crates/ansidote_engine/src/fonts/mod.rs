use std::path::Path;

use image::RgbaImage;

use crate::{Color, Result};

mod bit_font;
pub use bit_font::*;

mod true_type;
pub use true_type::*;

/// A font that can measure and render text.
///
/// Widgets only borrow fonts, a single font can back several widgets.
pub trait GlyphFont {
    fn name(&self) -> &str;

    /// Pixel size `(width, height)` of `text` rendered on a single line.
    fn size_of(&self, text: &str) -> (u32, u32);

    /// Renders `text` on a single line. The alpha channel of the result is
    /// the glyph coverage, everything outside of the glyphs is transparent.
    fn render(&self, text: &str, color: Color) -> RgbaImage;
}

/// Loads a font file: `ttf`/`otf` files are rasterised at `pixel_size`,
/// everything else is treated as a bitmap font (PSF1, PSF2 or raw).
///
/// # Errors
///
/// Fails if the file can't be read or isn't a valid font.
pub fn load_font(file_name: &Path, pixel_size: f32) -> Result<Box<dyn GlyphFont>> {
    let ext = file_name.extension().map(|ext| ext.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
    let font: Box<dyn GlyphFont> = match ext.as_str() {
        "ttf" | "otf" => Box::new(TrueTypeFont::load(file_name, pixel_size)?),
        _ => Box::new(BitFont::load(file_name)?),
    };
    log::info!("loaded font '{}' from {}", font.name(), file_name.display());
    Ok(font)
}
