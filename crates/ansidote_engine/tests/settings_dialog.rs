//! Settings dialog boundary tests
//!
//! The dialog is driven through scripted prompts, the terminal prompt is fed
//! from in-memory buffers.

use std::io::Cursor;

use ansidote_engine::{open_settings_dialog, CanvasSize, EngineError, PromptResponse, Result, SettingsPrompt, TerminalPrompt};
use pretty_assertions::assert_eq;

const CURRENT: CanvasSize = CanvasSize::new(80, 24);

fn confirm(width: &str, height: &str) -> impl FnMut(CanvasSize) -> Result<PromptResponse> {
    let (width, height) = (width.to_string(), height.to_string());
    move |_current: CanvasSize| {
        Ok(PromptResponse::Confirmed {
            width: width.clone(),
            height: height.clone(),
        })
    }
}

#[test]
fn test_confirm_valid_input() {
    let size = open_settings_dialog(&mut confirm("120", "40"), CURRENT).unwrap();
    assert_eq!(size, CanvasSize::new(120, 40));
}

#[test]
fn test_confirm_non_numeric_keeps_values() {
    let size = open_settings_dialog(&mut confirm("wide", "tall"), CURRENT).unwrap();
    assert_eq!(size, CURRENT);
}

#[test]
fn test_one_invalid_field_keeps_both_values() {
    let size = open_settings_dialog(&mut confirm("120", "tall"), CURRENT).unwrap();
    assert_eq!(size, CURRENT);
    let size = open_settings_dialog(&mut confirm("wide", "40"), CURRENT).unwrap();
    assert_eq!(size, CURRENT);
}

#[test]
fn test_cancel_returns_original() {
    let mut prompt = |_current: CanvasSize| -> Result<PromptResponse> { Ok(PromptResponse::Cancelled) };
    let size = open_settings_dialog(&mut prompt, CURRENT).unwrap();
    assert_eq!(size, CURRENT);
}

#[test]
fn test_prompt_is_seeded_with_current_size() {
    let mut seen = None;
    let mut prompt = |current: CanvasSize| -> Result<PromptResponse> {
        seen = Some(current);
        Ok(PromptResponse::Cancelled)
    };
    open_settings_dialog(&mut prompt, CURRENT).unwrap();
    assert_eq!(seen, Some(CURRENT));
}

#[test]
fn test_prompt_errors_propagate() {
    let mut prompt = |_current: CanvasSize| -> Result<PromptResponse> { Err(EngineError::Io(std::io::Error::other("terminal closed"))) };
    assert!(matches!(open_settings_dialog(&mut prompt, CURRENT), Err(EngineError::Io(_))));
}

#[test]
fn test_terminal_prompt_confirm() {
    let mut prompt = TerminalPrompt::new(Cursor::new("120\n40\n"), Vec::new());
    let size = open_settings_dialog(&mut prompt, CURRENT).unwrap();
    assert_eq!(size, CanvasSize::new(120, 40));

    let (_, output) = prompt.into_inner();
    assert_eq!(String::from_utf8(output).unwrap(), "Canvas Width: [80]: Canvas Height: [24]: ");
}

#[test]
fn test_terminal_prompt_empty_keeps_seed() {
    let mut prompt = TerminalPrompt::new(Cursor::new("\n 30 \n"), Vec::new());
    let response = prompt.prompt(CURRENT).unwrap();
    assert_eq!(
        response,
        PromptResponse::Confirmed {
            width: "80".to_string(),
            height: "30".to_string()
        }
    );
}

#[test]
fn test_terminal_prompt_end_of_input_cancels() {
    let mut prompt = TerminalPrompt::new(Cursor::new("120\n"), Vec::new());
    assert_eq!(prompt.prompt(CURRENT).unwrap(), PromptResponse::Cancelled);

    let mut prompt = TerminalPrompt::new(Cursor::new(""), Vec::new());
    let size = open_settings_dialog(&mut prompt, CURRENT).unwrap();
    assert_eq!(size, CURRENT);
}

#[test]
fn test_terminal_prompt_invalid_text() {
    let mut prompt = TerminalPrompt::new(Cursor::new("abc\n40\n"), Vec::new());
    let size = open_settings_dialog(&mut prompt, CURRENT).unwrap();
    assert_eq!(size, CURRENT);
}
