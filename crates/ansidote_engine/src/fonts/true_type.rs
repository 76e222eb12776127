use std::{fs, path::Path};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::GlyphFont;
use crate::{Color, EngineError, Result};

/// TrueType/OpenType font rasterised at a fixed pixel size.
pub struct TrueTypeFont {
    name: String,
    font: FontVec,
    scale: PxScale,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont").field("name", &self.name).field("scale", &self.scale.y).finish()
    }
}

impl TrueTypeFont {
    /// # Errors
    ///
    /// Fails if the data isn't a parsable font or `pixel_size` isn't positive.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>, pixel_size: f32) -> Result<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(EngineError::InvalidFontSize { size: pixel_size });
        }
        Ok(Self {
            name: name.into(),
            font: FontVec::try_from_vec(data)?,
            scale: PxScale::from(pixel_size),
        })
    }

    /// # Errors
    ///
    /// Fails if the file can't be read or [`TrueTypeFont::from_bytes`] fails.
    pub fn load(file_name: &Path, pixel_size: f32) -> Result<Self> {
        let data = fs::read(file_name).map_err(|err| EngineError::read_file(file_name, err.to_string()))?;
        let name = file_name.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        TrueTypeFont::from_bytes(name, data, pixel_size)
    }

    fn text_width(&self, text: &str) -> f32 {
        let scaled_font = self.font.as_scaled(self.scale);
        text.chars().map(|c| scaled_font.h_advance(scaled_font.glyph_id(c))).sum()
    }
}

impl GlyphFont for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_of(&self, text: &str) -> (u32, u32) {
        let scaled_font = self.font.as_scaled(self.scale);
        let line_height = scaled_font.ascent() - scaled_font.descent();
        (self.text_width(text).ceil() as u32, line_height.ceil() as u32)
    }

    fn render(&self, text: &str, color: Color) -> RgbaImage {
        let (width, height) = self.size_of(text);
        let mut rgba = RgbaImage::new(width, height);
        if width == 0 || height == 0 {
            return rgba;
        }

        let scaled_font = self.font.as_scaled(self.scale);
        let baseline = scaled_font.ascent();
        let mut x_offset = 0.0f32;

        for c in text.chars() {
            let glyph_id = scaled_font.glyph_id(c);
            let glyph = glyph_id.with_scale_and_position(self.scale, ab_glyph::point(x_offset, baseline));

            if let Some(outlined) = scaled_font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = bounds.min.x as i32 + px as i32;
                    let y = bounds.min.y as i32 + py as i32;
                    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                        return;
                    }
                    let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
                    let dst = rgba.get_pixel_mut(x as u32, y as u32);
                    if alpha > dst[3] {
                        *dst = Rgba([color.r, color.g, color.b, alpha]);
                    }
                });
            }

            x_offset += scaled_font.h_advance(glyph_id);
        }

        rgba
    }
}
