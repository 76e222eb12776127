use ansidote_engine::CanvasSize;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "ansidote";

/// Lazily initialized project directories (computed once on first access)
static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

// =============================================================================
// Persisted options
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSettings {
    /// Bitmap (PSF1/PSF2/raw) or outline (ttf/otf) font.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Rasterisation size for outline fonts, ignored by bitmap fonts.
    #[serde(default = "default_pixel_size")]
    pub pixel_size: f32,
}

fn default_pixel_size() -> f32 {
    16.0
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            path: None,
            pixel_size: default_pixel_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Palette file, the 6x6x6 color cube is used without one.
    #[serde(default)]
    pub palette: Option<PathBuf>,

    /// Text file listing the glyphs of the character map.
    #[serde(default)]
    pub glyphs: Option<PathBuf>,

    #[serde(default)]
    pub canvas: CanvasSize,

    #[serde(default)]
    pub font: FontSettings,

    #[serde(default = "default_character_map_extent")]
    pub character_map: Extent,

    #[serde(default = "default_palette_extent")]
    pub palette_widget: Extent,
}

fn default_character_map_extent() -> Extent {
    Extent::new(560, 400)
}

fn default_palette_extent() -> Extent {
    Extent::new(300, 300)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: None,
            glyphs: None,
            canvas: CanvasSize::default(),
            font: FontSettings::default(),
            character_map: default_character_map_extent(),
            palette_widget: default_palette_extent(),
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.toml";

    /// Reads the settings file. A missing or unreadable file yields the
    /// defaults, errors are logged.
    pub fn load(file_path: &Path) -> Self {
        if !file_path.exists() {
            log::info!("no settings file at {}, using defaults", file_path.display());
            return Self::default();
        }
        match fs::read_to_string(file_path) {
            Ok(txt) => match toml::from_str::<Settings>(&txt) {
                Ok(settings) => return settings,
                Err(err) => log::error!("Error parsing settings file {}: {}", file_path.display(), err),
            },
            Err(err) => log::error!("Error reading settings file {}: {}", file_path.display(), err),
        }
        Self::default()
    }

    /// Atomically write settings to file (write to temp, then rename).
    pub fn store(&self, file_path: &Path) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        let dir = file_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        let file_name = file_path.file_name().map_or_else(|| Self::FILE_NAME.into(), |n| n.to_string_lossy());
        let temp_path = dir.join(format!(".{file_name}.tmp"));

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();
        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        if let Err(err) = fs::rename(&temp_path, file_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        log::info!("stored settings in {}", file_path.display());
        Ok(())
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_empty_file() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.canvas, CanvasSize::new(80, 25));
        assert_eq!(settings.character_map, Extent::new(560, 400));
    }

    #[test]
    fn test_partial_file() {
        let settings: Settings = toml::from_str("palette = \"dos.pal\"\n[canvas]\nwidth = 132\nheight = 50\n").unwrap();
        assert_eq!(settings.canvas, CanvasSize::new(132, 50));
        assert_eq!(settings.palette, Some(PathBuf::from("dos.pal")));
        assert_eq!(settings.font, FontSettings::default());
    }

    #[test]
    fn test_store_and_load() {
        let dir = std::env::temp_dir().join(format!("ansidote_settings_{}", std::process::id()));
        let file = dir.join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.canvas = CanvasSize::new(120, 40);
        settings.font.path = Some(PathBuf::from("/fonts/topaz.psf"));
        settings.glyphs = Some(PathBuf::from("glyphs.txt"));
        settings.store(&file).unwrap();

        assert_eq!(Settings::load(&file), settings);
        assert!(!file.with_file_name(".settings.toml.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_or_broken() {
        let dir = std::env::temp_dir().join(format!("ansidote_broken_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        assert_eq!(Settings::load(&dir.join("missing.toml")), Settings::default());

        let file = dir.join("broken.toml");
        fs::write(&file, "canvas = 42").unwrap();
        assert_eq!(Settings::load(&file), Settings::default());
        fs::remove_dir_all(&dir).unwrap();
    }
}
