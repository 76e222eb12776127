#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_lossless)]

use std::path::PathBuf;

use ansidote_engine::Position;
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, Naming};
use lazy_static::lazy_static;
use semver::Version;

mod commands;
mod settings;

pub use settings::*;

lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
}

#[derive(Parser, Debug)]
#[command(version, about = "Glyph and palette pickers of the ansidote ANSI art editor", long_about = None)]
pub struct Args {
    /// Settings file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the character map and the palette to PNG files
    Render {
        /// Output directory for charmap.png and palette.png
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Font file (PSF1, PSF2, raw bitmap, ttf or otf)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Palette file (hex, pal, gpl, txt, ice or bin)
        #[arg(long, value_name = "FILE")]
        palette: Option<PathBuf>,

        /// Text file with the glyphs to show
        #[arg(long, value_name = "FILE")]
        glyphs: Option<PathBuf>,

        /// Character map cell to select
        #[arg(long = "char", value_name = "X,Y")]
        character: Option<Position>,

        /// Palette cell to select as foreground color
        #[arg(long, value_name = "X,Y")]
        fg: Option<Position>,

        /// Palette cell to select as background color
        #[arg(long, value_name = "X,Y")]
        bg: Option<Position>,
    },

    /// Convert a palette file, the format follows the output extension
    ConvertPalette {
        /// Palette to convert, defaults to the configured palette
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (hex, pal, gpl, txt, ice or bin)
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },

    /// Change the canvas size
    Settings,

    /// Show the settings and the layout of both pickers
    Info,
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = Settings::config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = match get_log_dir() {
        Some(log_dir) => Some(
            Logger::try_with_env_or_str("info")?
                .log_to_file(FileSpec::default().directory(&log_dir).basename("ansidote").suffix("log").suppress_timestamp())
                .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
                .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
                .start()?,
        ),
        None => {
            eprintln!("Failed to create log file");
            None
        }
    };

    log::info!("Starting ansidote {}", *VERSION);

    let Some(settings_file) = args.config.or_else(Settings::config_file) else {
        anyhow::bail!("can't determine the settings file, pass --config");
    };
    let mut settings = Settings::load(&settings_file);

    match args.command {
        Command::Render {
            out,
            font,
            palette,
            glyphs,
            character,
            fg,
            bg,
        } => {
            let options = commands::RenderOptions {
                out,
                font,
                palette,
                glyphs,
                character,
                foreground: fg,
                background: bg,
            };
            commands::render(&settings, &options)?;
        }
        Command::ConvertPalette { input, output } => commands::convert_palette(&settings, input.as_deref(), &output)?,
        Command::Settings => commands::settings(&mut settings, &settings_file)?,
        Command::Info => commands::info(&settings, &settings_file, &mut std::io::stdout())?,
    }

    log::info!("Shutting down.");
    Ok(())
}
