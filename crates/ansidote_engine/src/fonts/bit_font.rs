use std::{fmt::Display, fs, path::Path};

use codepages::tables::UNICODE_TO_CP437;
use image::{Rgba, RgbaImage};

use super::GlyphFont;
use crate::{Color, EngineError, Result};

/// Bitmap of a single glyph, rows top to bottom, each row padded to whole bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub data: Vec<u8>,
}

impl Glyph {
    fn is_set(&self, bytes_per_row: usize, x: usize, y: usize) -> bool {
        self.data.get(y * bytes_per_row + x / 8).is_some_and(|b| b & (0x80 >> (x % 8)) != 0)
    }
}

/// Fixed cell bitmap font with CP437 glyph slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BitFont {
    pub name: String,
    pub width: u32,
    pub height: u32,
    glyphs: Vec<Glyph>,
}

impl Display for BitFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}x{}, {} glyphs)", self.name, self.width, self.height, self.glyphs.len())
    }
}

impl BitFont {
    const PSF1_MAGIC: u16 = 0x0436;
    const PSF1_MODE512: u8 = 0x01;
    const PSF1_HEADER_SIZE: usize = 4;

    const PSF2_MAGIC: u32 = 0x864a_b572;
    // max version recognized so far
    const PSF2_MAXVERSION: u32 = 0x00;
    const PSF2_HEADER_SIZE: usize = 32;

    /// Builds a font from packed glyph data, `length` glyphs of
    /// `height * ceil(width / 8)` bytes each.
    ///
    /// # Errors
    ///
    /// Fails if `data` is shorter than `length` glyphs.
    pub fn from_glyph_data(name: impl Into<String>, width: u32, height: u32, length: usize, data: &[u8]) -> Result<Self> {
        let char_size = height as usize * bytes_per_row(width);
        let expected = length * char_size;
        if data.len() < expected || char_size == 0 {
            return Err(EngineError::FontLengthMismatch { expected, actual: data.len() });
        }
        let glyphs = data[..expected].chunks_exact(char_size).map(|chunk| Glyph { data: chunk.to_vec() }).collect();
        Ok(Self {
            name: name.into(),
            width,
            height,
            glyphs,
        })
    }

    fn load_psf1(font_name: String, data: &[u8]) -> Result<Self> {
        if data.len() < Self::PSF1_HEADER_SIZE {
            return Err(EngineError::PsfHeaderTooShort { size: data.len() });
        }
        let mode = data[2];
        let charsize = data[3] as u32;
        let length = if mode & BitFont::PSF1_MODE512 == BitFont::PSF1_MODE512 { 512 } else { 256 };
        BitFont::from_glyph_data(font_name, 8, charsize, length, &data[Self::PSF1_HEADER_SIZE..])
    }

    fn load_psf2(font_name: String, data: &[u8]) -> Result<Self> {
        if data.len() < Self::PSF2_HEADER_SIZE {
            return Err(EngineError::PsfHeaderTooShort { size: data.len() });
        }
        let header = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        let version = header(4);
        if version > BitFont::PSF2_MAXVERSION {
            return Err(EngineError::UnsupportedPsfVersion { version });
        }
        let headersize = header(8) as usize;
        // flags at 12
        let length = header(16) as usize;
        let charsize = header(20) as usize;
        let height = header(24);
        let width = header(28);

        if charsize != height as usize * bytes_per_row(width) {
            return Err(EngineError::FontLengthMismatch {
                expected: height as usize * bytes_per_row(width),
                actual: charsize,
            });
        }
        let Some(glyph_data) = data.get(headersize..) else {
            return Err(EngineError::FontLengthMismatch {
                expected: headersize + length * charsize,
                actual: data.len(),
            });
        };
        BitFont::from_glyph_data(font_name, width, height, length, glyph_data)
    }

    fn load_plain_font(font_name: String, data: &[u8]) -> Result<Self> {
        if data.is_empty() || data.len() % 256 != 0 {
            return Err(EngineError::UnknownFontFormat { size: data.len() });
        }
        let char_height = (data.len() / 256) as u32;
        BitFont::from_glyph_data(font_name, 8, char_height, 256, data)
    }

    /// Detects PSF1/PSF2 by their magic numbers, anything else is read as a
    /// raw font of 256 glyphs that are 8 pixels wide.
    ///
    /// # Errors
    ///
    /// Fails on unsupported versions and length mismatches.
    pub fn from_bytes(font_name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let font_name = font_name.into();
        if data.len() >= 2 && u16::from_le_bytes([data[0], data[1]]) == BitFont::PSF1_MAGIC {
            return BitFont::load_psf1(font_name, data);
        }
        if data.len() >= 4 && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == BitFont::PSF2_MAGIC {
            return BitFont::load_psf2(font_name, data);
        }
        BitFont::load_plain_font(font_name, data)
    }

    /// # Errors
    ///
    /// Fails if the file can't be read or [`BitFont::from_bytes`] fails.
    pub fn load(file_name: &Path) -> Result<Self> {
        let bytes = fs::read(file_name).map_err(|err| EngineError::read_file(file_name, err.to_string()))?;
        let name = file_name.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        BitFont::from_bytes(name, &bytes)
    }

    pub fn length(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph slot of `ch`: ASCII maps to itself, everything else goes through
    /// the CP437 table.
    pub fn glyph_index(&self, ch: char) -> Option<usize> {
        let index = if ch.is_ascii() {
            ch as usize
        } else {
            let Some(&cp437) = UNICODE_TO_CP437.get(&ch) else {
                return None;
            };
            cp437 as usize
        };
        (index < self.glyphs.len()).then_some(index)
    }

    pub fn get_glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyph_index(ch).and_then(|i| self.glyphs.get(i))
    }
}

fn bytes_per_row(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

impl GlyphFont for BitFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_of(&self, text: &str) -> (u32, u32) {
        (text.chars().count() as u32 * self.width, self.height)
    }

    fn render(&self, text: &str, color: Color) -> RgbaImage {
        let (width, height) = self.size_of(text);
        let mut image = RgbaImage::new(width, height);
        let pixel = Rgba([color.r, color.g, color.b, 0xFF]);
        let stride = bytes_per_row(self.width);
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = self.get_glyph(ch) else {
                continue;
            };
            let base_x = i as u32 * self.width;
            for y in 0..self.height {
                for x in 0..self.width {
                    if glyph.is_set(stride, x as usize, y as usize) {
                        image.put_pixel(base_x + x, y, pixel);
                    }
                }
            }
        }
        image
    }
}
