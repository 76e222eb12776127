//! Canvas size dialog.
//!
//! The modal interaction itself belongs to the host UI. It implements
//! [`SettingsPrompt`] and [`open_settings_dialog`] turns the raw answers into
//! a validated [`CanvasSize`].

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: 80, height: 25 }
    }
}

impl Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses both fields as positive integers. Surrounding whitespace is
    /// ignored. Returns `None` if either field is invalid.
    pub fn parse(width: &str, height: &str) -> Option<Self> {
        let width = width.trim().parse::<u32>().ok().filter(|w| *w > 0)?;
        let height = height.trim().parse::<u32>().ok().filter(|h| *h > 0)?;
        Some(Self { width, height })
    }
}

/// What the user did with the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// Confirmed with the raw contents of both fields.
    Confirmed { width: String, height: String },
    Cancelled,
}

/// Host side of the settings dialog: shows two fields seeded with the
/// current size and blocks until the user confirms or cancels.
pub trait SettingsPrompt {
    /// # Errors
    ///
    /// Only for failures of the interaction itself (e.g. closed terminal).
    fn prompt(&mut self, current: CanvasSize) -> Result<PromptResponse>;
}

impl<F> SettingsPrompt for F
where
    F: FnMut(CanvasSize) -> Result<PromptResponse>,
{
    fn prompt(&mut self, current: CanvasSize) -> Result<PromptResponse> {
        self(current)
    }
}

/// Runs the settings dialog and returns the new canvas size.
///
/// Invalid input is reported and leaves both values unchanged, cancelling
/// returns `current` as well.
///
/// # Errors
///
/// Propagates errors of the prompt itself.
pub fn open_settings_dialog(prompt: &mut dyn SettingsPrompt, current: CanvasSize) -> Result<CanvasSize> {
    match prompt.prompt(current)? {
        PromptResponse::Confirmed { width, height } => match CanvasSize::parse(&width, &height) {
            Some(size) => {
                log::info!("canvas size changed from {current} to {size}");
                Ok(size)
            }
            None => {
                log::warn!("Invalid W/H: '{width}' x '{height}', keeping {current}");
                Ok(current)
            }
        },
        PromptResponse::Cancelled => Ok(current),
    }
}

/// Line based prompt on a terminal (or any reader/writer pair).
///
/// An empty answer keeps the seeded value, end of input cancels.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, label: &str, seed: u32) -> Result<Option<String>> {
        write!(self.output, "{label} [{seed}]: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(Some(seed.to_string()));
        }
        Ok(Some(answer.to_string()))
    }
}

impl<R: BufRead, W: Write> SettingsPrompt for TerminalPrompt<R, W> {
    fn prompt(&mut self, current: CanvasSize) -> Result<PromptResponse> {
        let Some(width) = self.ask("Canvas Width:", current.width)? else {
            return Ok(PromptResponse::Cancelled);
        };
        let Some(height) = self.ask("Canvas Height:", current.height)? else {
            return Ok(PromptResponse::Cancelled);
        };
        Ok(PromptResponse::Confirmed { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(CanvasSize::parse("120", "40"), Some(CanvasSize::new(120, 40)));
        assert_eq!(CanvasSize::parse(" 120 ", "40\n"), Some(CanvasSize::new(120, 40)));
        assert_eq!(CanvasSize::parse("abc", "40"), None);
        assert_eq!(CanvasSize::parse("120", ""), None);
        assert_eq!(CanvasSize::parse("0", "40"), None);
        assert_eq!(CanvasSize::parse("-5", "40"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CanvasSize::new(80, 25).to_string(), "80x25");
    }
}
