// Reader configuration
// Loaded from ~/.config/gridmenu/reader.toml

mod error;

pub use error::ConfigError;

use gridmenu_engine::SoundCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Register the built-in action and condition parsers
    pub builtins: bool,
    pub placeholders: PlaceholderConfig,
    pub sound: SoundDefaults,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            placeholders: PlaceholderConfig::default(),
            sound: SoundDefaults::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Text substituted in messages and commands before they reach the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Replaced with the viewer's name
    pub player: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { player: "<player>".to_string() }
    }
}

/// Values used by `play_sound` when a document leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundDefaults {
    pub volume: f32,
    pub pitch: f32,
    pub category: SoundCategory,
    pub seed: i64,
}

impl Default for SoundDefaults {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            category: SoundCategory::Master,
            seed: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReaderConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: ReaderConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    /// Load from `default_path()` if it exists, defaults otherwise.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmenu")
            .join("reader.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholders.player.is_empty() {
            return Err(ConfigError::Validation(
                "placeholders.player must not be empty".into(),
            ));
        }
        if !self.sound.volume.is_finite() || self.sound.volume < 0.0 {
            return Err(ConfigError::Validation(format!(
                "sound.volume must be a non-negative number, got {}",
                self.sound.volume
            )));
        }
        if !self.sound.pitch.is_finite() || self.sound.pitch < 0.0 {
            return Err(ConfigError::Validation(format!(
                "sound.pitch must be a non-negative number, got {}",
                self.sound.pitch
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(ReaderConfig::from_toml("").unwrap(), ReaderConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ReaderConfig::from_toml(
            r#"
builtins = false

[sound]
volume = 0.5
category = "ui"
"#,
        )
        .unwrap();
        assert!(!config.builtins);
        assert_eq!(config.placeholders.player, "<player>");
        assert_eq!(config.sound.volume, 0.5);
        assert_eq!(config.sound.pitch, 1.0);
        assert_eq!(config.sound.category, SoundCategory::Ui);
        assert_eq!(config.sound.seed, 0);
    }

    #[test]
    fn custom_placeholder() {
        let config = ReaderConfig::from_toml("[placeholders]\nplayer = \"%name%\"\n").unwrap();
        assert_eq!(config.placeholders.player, "%name%");
    }

    #[test]
    fn unknown_category_is_parse_error() {
        let err = ReaderConfig::from_toml("[sound]\ncategory = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_volume_is_rejected() {
        let err = ReaderConfig::from_toml("[sound]\nvolume = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("sound.volume"));
    }

    #[test]
    fn empty_placeholder_is_rejected() {
        let err = ReaderConfig::from_toml("[placeholders]\nplayer = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sound]\npitch = 2.0\nseed = 42").unwrap();
        let config = ReaderConfig::load(file.path()).unwrap();
        assert_eq!(config.sound.pitch, 2.0);
        assert_eq!(config.sound.seed, 42);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReaderConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn default_path_ends_with_reader_toml() {
        let path = ReaderConfig::default_path();
        assert!(path.ends_with("gridmenu/reader.toml"));
    }
}
