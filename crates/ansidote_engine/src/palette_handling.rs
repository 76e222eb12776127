#![allow(clippy::many_single_char_names)]
use std::{fmt::Display, path::Path, sync::Arc};

use image::Rgb;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

lazy_static::lazy_static! {
    static ref HEX_REGEX: Regex = Regex::new(r"([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})").unwrap();

    static ref PAL_REGEX: Regex = Regex::new(r"(\d+)\s+(\d+)\s+(\d+)").unwrap();

    static ref GPL_COLOR_REGEX: Regex = Regex::new(r"^\s*(\d+)\s+(\d+)\s+(\d+)").unwrap();
    static ref GPL_NAME_REGEX: Regex = Regex::new(r"\s*#Palette Name:\s*(.*)\s*").unwrap();
    static ref GPL_DESCRIPTION_REGEX: Regex = Regex::new(r"\s*#Description:\s*(.*)\s*").unwrap();

    static ref TXT_COLOR_REGEX: Regex = Regex::new(r"([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})").unwrap();
    static ref TXT_NAME_REGEX: Regex = Regex::new(r"\s*;Palette Name:\s*(.*)\s*").unwrap();
    static ref TXT_DESCRIPTION_REGEX: Regex = Regex::new(r"\s*;Description:\s*(.*)\s*").unwrap();

    static ref ICE_PALETTE_NAME_REGEX: Regex = Regex::new(r"\s*#Palette Name:\s*(.*)\s*").unwrap();
    static ref ICE_AUTHOR_REGEX: Regex = Regex::new(r"\s*#Author:\s*(.*)\s*").unwrap();
    static ref ICE_DESCRIPTION_REGEX: Regex = Regex::new(r"\s*#Description:\s*(.*)\s*").unwrap();
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `rrggbb`, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns an error if no hex triple is found.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let Some(cap) = HEX_REGEX.captures(hex) else {
            return Err(EngineError::invalid_palette(format!("invalid hex color: {hex}")));
        };
        let (_, [r, g, b]) = cap.extract();
        Ok(Color::new(u8::from_str_radix(r, 16)?, u8::from_str_radix(g, 16)?, u8::from_str_radix(b, 16)?))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::new(value[0], value[1], value[2])
    }
}

impl From<Color> for Rgb<u8> {
    fn from(value: Color) -> Rgb<u8> {
        Rgb([value.r, value.g, value.b])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    Ice,
    Hex,
    Pal,
    Gpl,
    Txt,
    /// Raw RGB triples, one byte per channel.
    Bin,
}

impl PaletteFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ice" => Some(PaletteFormat::Ice),
            "hex" => Some(PaletteFormat::Hex),
            "pal" => Some(PaletteFormat::Pal),
            "gpl" => Some(PaletteFormat::Gpl),
            "txt" => Some(PaletteFormat::Txt),
            "bin" => Some(PaletteFormat::Bin),
            _ => None,
        }
    }
}

/// Immutable, ordered table of colors backing the palette picker.
///
/// The colors are shared between clones.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteData {
    pub title: String,
    pub description: String,
    pub author: String,
    colors: Arc<[Color]>,
}

impl Default for PaletteData {
    fn default() -> Self {
        PaletteData::color_cube()
    }
}

impl PaletteData {
    pub fn from_slice(colors: &[Color]) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            colors: colors.into(),
        }
    }

    /// The 6x6x6 color cube (216 entries), red major.
    pub fn color_cube() -> Self {
        const LEVELS: [u8; 6] = [0x00, 0x33, 0x66, 0x99, 0xCC, 0xFF];
        let mut colors = Vec::with_capacity(216);
        for r in LEVELS {
            for g in LEVELS {
                for b in LEVELS {
                    colors.push(Color::new(r, g, b));
                }
            }
        }
        Self {
            title: "Color cube".to_string(),
            ..Self::from_slice(&colors)
        }
    }

    pub fn dos_default() -> Self {
        Self {
            title: "Dos default".to_string(),
            ..Self::from_slice(&DOS_DEFAULT_PALETTE)
        }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// # Errors
    ///
    /// Returns an error if the data doesn't match `format` or contains no colors.
    pub fn load_palette(format: PaletteFormat, bytes: &[u8]) -> Result<Self> {
        let mut colors = Vec::new();
        let mut title = String::new();
        let mut author = String::new();
        let mut description = String::new();
        match format {
            PaletteFormat::Hex => {
                let data = String::from_utf8(bytes.to_vec())?;
                for (_, [r, g, b]) in HEX_REGEX.captures_iter(&data).map(|c| c.extract()) {
                    colors.push(Color::new(u8::from_str_radix(r, 16)?, u8::from_str_radix(g, 16)?, u8::from_str_radix(b, 16)?));
                }
            }
            PaletteFormat::Pal => {
                let data = String::from_utf8(bytes.to_vec())?;
                for (i, line) in data.lines().enumerate() {
                    match i {
                        0 => {
                            if line.trim() != "JASC-PAL" {
                                return Err(EngineError::invalid_palette(format!("only JASC-PAL supported: {line}")));
                            }
                        }
                        1 | 2 => {
                            // version and color count
                        }
                        _ => {
                            for (_, [r, g, b]) in PAL_REGEX.captures_iter(line).map(|c| c.extract()) {
                                colors.push(Color::new(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?));
                            }
                        }
                    }
                }
            }
            PaletteFormat::Gpl => {
                let data = String::from_utf8(bytes.to_vec())?;
                for (i, line) in data.lines().enumerate() {
                    if i == 0 {
                        if line.trim() != "GIMP Palette" {
                            return Err(EngineError::invalid_palette(format!("only GIMP Palette supported: {line}")));
                        }
                        continue;
                    }
                    if line.starts_with('#') {
                        if let Some(name) = GPL_NAME_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            title = name.as_str().trim().to_string();
                        }
                        if let Some(descr) = GPL_DESCRIPTION_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            description = descr.as_str().trim().to_string();
                        }
                    } else if let Some(cap) = GPL_COLOR_REGEX.captures(line) {
                        let (_, [r, g, b]) = cap.extract();
                        colors.push(Color::new(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?));
                    }
                }
            }
            PaletteFormat::Ice => {
                let data = String::from_utf8(bytes.to_vec())?;
                for (i, line) in data.lines().enumerate() {
                    if i == 0 {
                        if line.trim() != "ICE Palette" {
                            return Err(EngineError::invalid_palette(format!("only ICE Palette supported: {line}")));
                        }
                        continue;
                    }
                    if line.starts_with('#') {
                        if let Some(name) = ICE_PALETTE_NAME_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            title = name.as_str().trim().to_string();
                        }
                        if let Some(descr) = ICE_DESCRIPTION_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            description = descr.as_str().trim().to_string();
                        }
                        if let Some(name) = ICE_AUTHOR_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            author = name.as_str().trim().to_string();
                        }
                    } else if HEX_REGEX.is_match(line) {
                        colors.push(Color::from_hex(line)?);
                    }
                }
            }
            PaletteFormat::Txt => {
                let data = String::from_utf8(bytes.to_vec())?;
                for line in data.lines() {
                    if line.starts_with(';') {
                        if let Some(name) = TXT_NAME_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            title = name.as_str().trim().to_string();
                        }
                        if let Some(descr) = TXT_DESCRIPTION_REGEX.captures(line).and_then(|cap| cap.get(1)) {
                            description = descr.as_str().trim().to_string();
                        }
                    } else if let Some(cap) = TXT_COLOR_REGEX.captures(line) {
                        let (_, [_a, r, g, b]) = cap.extract();
                        colors.push(Color::new(u8::from_str_radix(r, 16)?, u8::from_str_radix(g, 16)?, u8::from_str_radix(b, 16)?));
                    }
                }
            }
            PaletteFormat::Bin => {
                if bytes.len() % 3 != 0 {
                    return Err(EngineError::invalid_palette(format!("raw palette length {} is not a multiple of 3", bytes.len())));
                }
                colors.extend(bytes.chunks_exact(3).map(|rgb| Color::new(rgb[0], rgb[1], rgb[2])));
            }
        }
        if colors.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        Ok(Self {
            title,
            description,
            author,
            colors: colors.into(),
        })
    }

    /// Loads a palette, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Fails on unknown extensions and on malformed data.
    pub fn import_palette(file_name: &Path, bytes: &[u8]) -> Result<Self> {
        let ext = file_name.extension().map(|ext| ext.to_string_lossy().to_string()).unwrap_or_default();
        let Some(format) = PaletteFormat::from_extension(&ext) else {
            return Err(EngineError::UnsupportedPaletteExtension { extension: ext });
        };
        log::debug!("importing palette {} as {:?}", file_name.display(), format);
        Self::load_palette(format, bytes)
    }

    /// Reads and imports a palette file from disk.
    ///
    /// # Errors
    ///
    /// Fails if the file can't be read or [`PaletteData::import_palette`] fails.
    pub fn load(file_name: &Path) -> Result<Self> {
        let bytes = std::fs::read(file_name).map_err(|err| EngineError::read_file(file_name, err.to_string()))?;
        Self::import_palette(file_name, &bytes)
    }

    pub fn export_palette(&self, format: PaletteFormat) -> Vec<u8> {
        let mut res = String::new();
        match format {
            PaletteFormat::Hex => {
                for c in self.color_iter() {
                    res.push_str(&format!("{:02x}{:02x}{:02x}\n", c.r, c.g, c.b));
                }
            }
            PaletteFormat::Pal => {
                res.push_str("JASC-PAL\n");
                res.push_str("0100\n");
                res.push_str(&format!("{}\n", self.len()));
                for c in self.color_iter() {
                    res.push_str(&format!("{} {} {}\n", c.r, c.g, c.b));
                }
            }
            PaletteFormat::Gpl => {
                res.push_str("GIMP Palette\n");
                res.push_str(&format!("#Palette Name: {}\n", self.title));
                res.push_str(&format!("#Description: {}\n", self.description));
                res.push_str(&format!("#Colors: {}\n", self.len()));
                for c in self.color_iter() {
                    res.push_str(&format!("{:3} {:3} {:3} {}\n", c.r, c.g, c.b, c.to_hex()));
                }
            }
            PaletteFormat::Ice => {
                res.push_str("ICE Palette\n");
                res.push_str(&format!("#Palette Name: {}\n", self.title));
                res.push_str(&format!("#Author: {}\n", self.author));
                res.push_str(&format!("#Description: {}\n", self.description));
                res.push_str(&format!("#Colors: {}\n", self.len()));
                for c in self.color_iter() {
                    res.push_str(&format!("{:02x}{:02x}{:02x}\n", c.r, c.g, c.b));
                }
            }
            PaletteFormat::Txt => {
                res.push_str(";paint.net Palette File\n");
                res.push_str(&format!(";Palette Name: {}\n", self.title));
                res.push_str(&format!(";Description: {}\n", self.description));
                res.push_str(&format!(";Colors: {}\n", self.len()));
                for c in self.color_iter() {
                    res.push_str(&format!("FF{:02x}{:02x}{:02x}\n", c.r, c.g, c.b));
                }
            }
            PaletteFormat::Bin => {
                return self.color_iter().flat_map(|c| [c.r, c.g, c.b]).collect();
            }
        }
        res.into_bytes()
    }
}

impl From<Vec<Color>> for PaletteData {
    fn from(value: Vec<Color>) -> Self {
        Self::from_slice(&value)
    }
}

fn parse_channel(txt: &str) -> Result<u8> {
    txt.parse::<u8>().map_err(|err| EngineError::invalid_palette(format!("color channel '{txt}': {err}")))
}

pub const DOS_DEFAULT_PALETTE: [Color; 16] = [
    Color::new(0x00, 0x00, 0x00), // black
    Color::new(0x00, 0x00, 0xAA), // blue
    Color::new(0x00, 0xAA, 0x00), // green
    Color::new(0x00, 0xAA, 0xAA), // cyan
    Color::new(0xAA, 0x00, 0x00), // red
    Color::new(0xAA, 0x00, 0xAA), // magenta
    Color::new(0xAA, 0x55, 0x00), // brown
    Color::new(0xAA, 0xAA, 0xAA), // lightgray
    Color::new(0x55, 0x55, 0x55), // darkgray
    Color::new(0x55, 0x55, 0xFF), // lightblue
    Color::new(0x55, 0xFF, 0x55), // lightgreen
    Color::new(0x55, 0xFF, 0xFF), // lightcyan
    Color::new(0xFF, 0x55, 0x55), // lightred
    Color::new(0xFF, 0x55, 0xFF), // lightmagenta
    Color::new(0xFF, 0xFF, 0x55), // yellow
    Color::new(0xFF, 0xFF, 0xFF), // white
];
