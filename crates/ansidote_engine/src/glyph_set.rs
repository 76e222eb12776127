use std::{fs, path::Path, sync::Arc};

use crate::{EngineError, Result};

const LETTERS: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS_AND_PUNCTUATION: &str = "1234567890!§$%&/()=?`´+#-.,;:_'*²³{[]}\\~@<>|^°";
const BOX_DRAWING: &str = concat!(
    "─━│┃┄┅┆┇┈┉┊┋┌┍┎┏┐┑┒┓└┕┖┗┘┙┚┛├┝┞┟┠┡┢┣┤┥┦┧┨┩┪┫┬┭┮┯┰┱┲┳┴┵",
    "┶┷┸┹┺┻┼┽┾┿╀╁╂╃╄╅╆╇╈╉╊╋╌╍╎╏═║╒╓╔╕╖╗╘╙╚╛╜╝╞╟╠╡╢╣╤╥╦╧╨╩╪╫╬",
    "╭╮╯╰╱╲╳╴╵╶╷╸╹╺╻╼╽╾╿"
);
const BLOCK_ELEMENTS: &str = "▀▁▂▃▄▅▆▇█▉▊▋▌▍▎▐░▒▓▔▕▖▗▘▙▚▛▜▝▞▟";

/// Ordered, immutable sequence of selectable characters.
///
/// Cloning is cheap, the characters are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    chars: Arc<[char]>,
}

impl Default for GlyphSet {
    /// Letters, digits, punctuation, box drawing and block elements.
    fn default() -> Self {
        let chars: Vec<char> = [LETTERS, DIGITS_AND_PUNCTUATION, BOX_DRAWING, BLOCK_ELEMENTS]
            .iter()
            .flat_map(|s| s.chars())
            .collect();
        Self { chars: chars.into() }
    }
}

impl GlyphSet {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect::<Vec<_>>().into(),
        }
    }

    /// Loads a glyph set from a UTF-8 text file. Line breaks are ignored,
    /// every other character (including spaces) is a glyph.
    ///
    /// # Errors
    ///
    /// Fails if the file can't be read, isn't UTF-8 or contains no glyphs.
    pub fn load(file_name: &Path) -> Result<Self> {
        let bytes = fs::read(file_name).map_err(|err| EngineError::read_file(file_name, err.to_string()))?;
        let text = String::from_utf8(bytes)?;
        let set = GlyphSet::new(text.chars().filter(|ch| *ch != '\n' && *ch != '\r'));
        if set.is_empty() {
            return Err(EngineError::EmptyGlyphSet);
        }
        log::debug!("loaded {} glyphs from {}", set.len(), file_name.display());
        Ok(set)
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn position(&self, ch: char) -> Option<usize> {
        self.chars.iter().position(|c| *c == ch)
    }
}

impl From<&str> for GlyphSet {
    fn from(value: &str) -> Self {
        GlyphSet::new(value.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let set = GlyphSet::default();
        assert_eq!(set.len(), 258);
        assert_eq!(set.get(0), Some(' '));
        assert_eq!(set.get(1), Some('A'));
        assert_eq!(set.position('█'), Some(set.len() - 23));
        assert_eq!(set.get(set.len() - 1), Some('▟'));
        assert_eq!(set.get(set.len()), None);
    }

    #[test]
    fn test_default_set_is_unique() {
        let set = GlyphSet::default();
        let mut chars: Vec<char> = set.iter().collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), set.len());
    }

    #[test]
    fn test_from_str() {
        let set = GlyphSet::from("ab c");
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(2), Some(' '));
    }
}
