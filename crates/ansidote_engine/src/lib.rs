#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]
//! Core of the ansidote ANSI art editor: glyph and color pickers that render
//! into offscreen RGB surfaces, plus the resources feeding them.

mod error;
pub use error::*;

mod position;
pub use position::*;

mod glyph_set;
pub use glyph_set::*;

mod palette_handling;
pub use palette_handling::*;

mod fonts;
pub use fonts::*;

pub mod geometry;
pub mod surface;

pub mod widgets;
pub use widgets::{CharacterMap, Palette, SelectOutcome};

mod settings_dialog;
pub use settings_dialog::*;
