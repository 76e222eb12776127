//! Unified error types for ansidote_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for resource loading in ansidote_engine
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    // === Font Errors ===
    #[error("Invalid PSF file: header too short ({size} bytes)")]
    PsfHeaderTooShort { size: usize },

    #[error("Unsupported PSF version: {version}")]
    UnsupportedPsfVersion { version: u32 },

    #[error("Font data length mismatch: expected {expected}, got {actual}")]
    FontLengthMismatch { expected: usize, actual: usize },

    #[error("Unknown font format ({size} bytes), expected 256 glyphs of 8px width")]
    UnknownFontFormat { size: usize },

    #[error("Invalid outline font: {0}")]
    OutlineFont(#[from] ab_glyph::InvalidFont),

    #[error("Invalid font pixel size: {size}")]
    InvalidFontSize { size: f32 },

    // === Palette Errors ===
    #[error("Invalid palette format: {message}")]
    InvalidPaletteFormat { message: String },

    #[error("Unsupported palette file extension: {extension}")]
    UnsupportedPaletteExtension { extension: String },

    #[error("Palette contains no colors")]
    EmptyPalette,

    // === Glyph Set Errors ===
    #[error("Glyph set contains no characters")]
    EmptyGlyphSet,

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Result type alias for ansidote_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPaletteFormat { message: msg.into() }
    }

    /// Create a read file error
    pub fn read_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::ReadFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}
