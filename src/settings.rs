//! Runner settings
//!
//! Persisted as JSON next to the level pack. Missing fields fall back to
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FINISH_DELAY, SIM_FRAME};
use crate::error::SimError;

/// Player kinematics used by the `Arcade` controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeTuning {
    /// Horizontal run speed (cells/s)
    pub x_speed: f32,
    /// Downward acceleration (cells/s²)
    pub gravity: f32,
    /// Upward speed given by a jump (cells/s)
    pub jump_speed: f32,
}

impl Default for ArcadeTuning {
    fn default() -> Self {
        Self {
            x_speed: 7.0,
            gravity: 30.0,
            jump_speed: 17.0,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the parser's RNG (coin phases)
    pub seed: u64,
    /// Linger time after a level is decided
    pub finish_delay: f32,
    /// Time fed to each tick
    pub frame_time: f32,
    /// Give up on a level after this many frames
    pub max_ticks: u32,
    /// Input script for headless runs (see `ScriptedInput::from_script`)
    pub script: String,

    // === Player ===
    pub arcade: ArcadeTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            finish_delay: FINISH_DELAY,
            frame_time: SIM_FRAME,
            max_ticks: 60 * 60,
            script: "r".to_string(),
            arcade: ArcadeTuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, using defaults when unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(SimError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "arcade": { "gravity": 10.0 } }"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.finish_delay, FINISH_DELAY);
        assert_eq!(settings.arcade.gravity, 10.0);
        assert_eq!(settings.arcade.x_speed, 7.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 3,
            max_ticks: 10,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json("{ seed: "), Err(SimError::Json(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tile-platformer-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 77,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
