//! Game options supplied by the host
//!
//! Mirrors what an embedding page passes in when it creates a game. Stored as
//! JSON so a host can keep it next to its own configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How fast new rows descend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    #[default]
    Ramp,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Ramp => "ramp",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "ramp" => Some(Difficulty::Ramp),
            _ => None,
        }
    }

    /// Shots without a pop before a new row is pushed
    pub fn row_every_shots(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Normal => 6,
            Difficulty::Ramp => 5,
        }
    }

    /// Seconds without a pop before a new row is pushed
    pub fn row_every_secs(&self) -> f32 {
        match self {
            Difficulty::Easy => 20.0,
            Difficulty::Normal => 18.0,
            Difficulty::Ramp => 16.0,
        }
    }
}

/// Color theme for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board width in pixels (0 = let the game pick)
    pub width: f32,
    /// Board height in pixels (0 = let the game pick)
    pub height: f32,
    pub theme: Theme,
    pub difficulty: Difficulty,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            theme: Theme::Light,
            difficulty: Difficulty::Ramp,
            muted: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, Difficulty::Ramp);
        assert_eq!(s.theme, Theme::Light);
        assert!(s.muted);
    }

    #[test]
    fn test_cadence() {
        assert_eq!(Difficulty::Easy.row_every_shots(), 8);
        assert_eq!(Difficulty::Normal.row_every_shots(), 6);
        assert_eq!(Difficulty::Ramp.row_every_shots(), 5);
        assert_eq!(Difficulty::Easy.row_every_secs(), 20.0);
        assert_eq!(Difficulty::Ramp.row_every_secs(), 16.0);
    }

    #[test]
    fn test_names() {
        assert_eq!(Difficulty::from_str("NORMAL"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("hard"), None);
        assert_eq!(Theme::from_str(Theme::Dark.as_str()), Some(Theme::Dark));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "difficulty": "easy", "width": 640 }"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.width, 640.0);
        assert_eq!(s.height, 0.0);
        assert!(s.muted);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            width: 1024.0,
            height: 768.0,
            theme: Theme::Dark,
            difficulty: Difficulty::Normal,
            muted: false,
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_load_missing_or_bad_file() {
        let dir = std::env::temp_dir();
        let missing = dir.join("hex_bubbles_missing_settings.json");
        let _ = std::fs::remove_file(&missing);
        assert_eq!(Settings::load(&missing), Settings::default());

        let bad = dir.join("hex_bubbles_bad_settings.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());
        let _ = std::fs::remove_file(&bad);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("hex_bubbles_saved_settings.json");
        let s = Settings {
            theme: Theme::Dark,
            ..Default::default()
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path), s);
        let _ = std::fs::remove_file(&path);
    }
}
