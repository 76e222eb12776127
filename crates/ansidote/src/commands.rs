use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use ansidote_engine::{
    load_font, open_settings_dialog, CharacterMap, GlyphFont, GlyphSet, Palette, PaletteData, PaletteFormat, Position, TerminalPrompt,
};
use anyhow::{bail, Context};

use crate::Settings;

/// Overrides and selections for the `render` command.
#[derive(Debug, Default)]
pub struct RenderOptions {
    pub out: PathBuf,
    pub font: Option<PathBuf>,
    pub palette: Option<PathBuf>,
    pub glyphs: Option<PathBuf>,
    pub character: Option<Position>,
    pub foreground: Option<Position>,
    pub background: Option<Position>,
}

fn open_font(settings: &Settings, font: Option<&Path>) -> anyhow::Result<Box<dyn GlyphFont>> {
    let Some(path) = font.or(settings.font.path.as_deref()) else {
        bail!("no font configured, pass --font or set font.path in the settings file");
    };
    load_font(path, settings.font.pixel_size).with_context(|| format!("loading font {}", path.display()))
}

fn open_glyphs(settings: &Settings, glyphs: Option<&Path>) -> anyhow::Result<GlyphSet> {
    match glyphs.or(settings.glyphs.as_deref()) {
        Some(path) => GlyphSet::load(path).with_context(|| format!("loading glyphs {}", path.display())),
        None => Ok(GlyphSet::default()),
    }
}

fn open_palette(settings: &Settings, palette: Option<&Path>) -> anyhow::Result<PaletteData> {
    match palette.or(settings.palette.as_deref()) {
        Some(path) => PaletteData::load(path).with_context(|| format!("loading palette {}", path.display())),
        None => Ok(PaletteData::default()),
    }
}

pub fn render(settings: &Settings, options: &RenderOptions) -> anyhow::Result<()> {
    let font = open_font(settings, options.font.as_deref())?;
    let glyphs = open_glyphs(settings, options.glyphs.as_deref())?;
    let colors = open_palette(settings, options.palette.as_deref())?;

    let extent = settings.character_map;
    let mut map = CharacterMap::new(extent.width, extent.height, font.as_ref(), glyphs);
    if let Some(pos) = options.character {
        if !map.select(pos.x, pos.y).is_selected() {
            log::warn!("no glyph at {pos}, keeping {:?}", map.selected_glyph());
        }
    }

    let extent = settings.palette_widget;
    let mut palette = Palette::new(extent.width, extent.height, colors);
    for (pos, is_foreground) in [(options.foreground, true), (options.background, false)] {
        let Some(pos) = pos else {
            continue;
        };
        if !palette.select(pos.x, pos.y, is_foreground).is_selected() {
            log::warn!("no palette entry at {pos}");
        }
    }

    std::fs::create_dir_all(&options.out).with_context(|| format!("creating {}", options.out.display()))?;
    let charmap_file = options.out.join("charmap.png");
    map.surface().save(&charmap_file).with_context(|| format!("writing {}", charmap_file.display()))?;
    let palette_file = options.out.join("palette.png");
    palette.surface().save(&palette_file).with_context(|| format!("writing {}", palette_file.display()))?;

    log::info!(
        "selected glyph {:?} at {}, foreground {} background {}",
        map.selected_glyph(),
        map.selected_index(),
        palette.selected_foreground().to_hex(),
        palette.selected_background().to_hex()
    );
    println!("{}", charmap_file.display());
    println!("{}", palette_file.display());
    Ok(())
}

/// Runs the canvas size dialog on the terminal and stores the result.
pub fn settings(settings: &mut Settings, file: &Path) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut prompt = TerminalPrompt::new(stdin.lock(), io::stdout());
    let size = open_settings_dialog(&mut prompt, settings.canvas)?;
    if size == settings.canvas {
        println!("Canvas size: {size}");
        return Ok(());
    }
    settings.canvas = size;
    settings.store(file)?;
    println!("Canvas size: {size}");
    Ok(())
}

/// Writes the configured (or given) palette in the format picked by the
/// extension of `output`.
pub fn convert_palette(settings: &Settings, input: Option<&Path>, output: &Path) -> anyhow::Result<()> {
    let ext = output.extension().map(|ext| ext.to_string_lossy().to_string()).unwrap_or_default();
    let Some(format) = PaletteFormat::from_extension(&ext) else {
        bail!("unsupported palette extension '{ext}' for {}", output.display());
    };
    let colors = open_palette(settings, input)?;
    std::fs::write(output, colors.export_palette(format)).with_context(|| format!("writing {}", output.display()))?;
    log::info!("wrote {} colors as {format:?} to {}", colors.len(), output.display());
    Ok(())
}

pub fn info(settings: &Settings, file: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "Settings file: {}", file.display())?;
    writeln!(out, "Canvas: {}", settings.canvas)?;

    let colors = open_palette(settings, None)?;
    let extent = settings.palette_widget;
    let palette = Palette::new(extent.width, extent.height, colors);
    writeln!(
        out,
        "Palette: {} colors in {}x{}, {} columns x {} rows, cell edge {:.2}",
        palette.colors().len(),
        extent.width,
        extent.height,
        palette.columns(),
        palette.rows(),
        palette.cell_edge()
    )?;

    let glyphs = open_glyphs(settings, None)?;
    match settings.font.path.as_deref() {
        Some(_) => {
            let font = open_font(settings, None)?;
            let extent = settings.character_map;
            let map = CharacterMap::new(extent.width, extent.height, font.as_ref(), glyphs);
            writeln!(
                out,
                "Character map: font '{}', {} glyphs in {}x{}, {} columns x {} rows, cell size {}",
                font.name(),
                map.glyphs().len(),
                extent.width,
                extent.height,
                map.columns(),
                map.rows(),
                map.cell_size()
            )?;
        }
        None => writeln!(out, "Character map: {} glyphs, no font configured", glyphs.len())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_info_without_font() {
        let mut out = Vec::new();
        info(&Settings::default(), Path::new("settings.toml"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Settings file: settings.toml");
        assert_eq!(lines[1], "Canvas: 80x25");
        assert_eq!(lines[2], "Palette: 216 colors in 300x300, 15 columns x 15 rows, cell edge 20.41");
        assert_eq!(lines[3], "Character map: 258 glyphs, no font configured");
    }

    #[test]
    fn test_convert_palette() {
        let dir = std::env::temp_dir().join(format!("ansidote_convert_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let gpl = dir.join("cube.gpl");
        convert_palette(&Settings::default(), None, &gpl).unwrap();
        let cube = PaletteData::load(&gpl).unwrap();
        assert_eq!(cube.len(), 216);
        assert_eq!(cube.get(215), PaletteData::color_cube().get(215));

        let hex = dir.join("cube.hex");
        convert_palette(&Settings::default(), Some(gpl.as_path()), &hex).unwrap();
        let text = std::fs::read_to_string(&hex).unwrap();
        assert_eq!(text.lines().count(), 216);
        assert_eq!(text.lines().next(), Some("000000"));

        assert!(convert_palette(&Settings::default(), None, &dir.join("cube.ase")).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_requires_font() {
        let options = RenderOptions {
            out: std::env::temp_dir(),
            ..Default::default()
        };
        assert!(render(&Settings::default(), &options).is_err());
    }

    #[test]
    fn test_render_writes_images() {
        let dir = std::env::temp_dir().join(format!("ansidote_render_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let font_file = dir.join("raw.f16");
        std::fs::write(&font_file, vec![0x18u8; 256 * 16]).unwrap();

        let options = RenderOptions {
            out: dir.join("out"),
            font: Some(font_file),
            character: Some(Position::new(2, 1)),
            foreground: Some(Position::new(3, 0)),
            background: Some(Position::new(99, 99)),
            ..Default::default()
        };
        render(&Settings::default(), &options).unwrap();

        let charmap = image::open(dir.join("out/charmap.png")).unwrap();
        assert_eq!((charmap.width(), charmap.height()), (560, 400));
        let palette = image::open(dir.join("out/palette.png")).unwrap();
        assert_eq!(palette.height(), 300);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
