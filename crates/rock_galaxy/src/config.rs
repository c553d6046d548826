//! Game configuration
//!
//! Only presentation and environment settings live here. Gameplay numbers
//! are constants in [`crate::rules`].

use serde::{Deserialize, Serialize};
use sprite_engine::config::Config;
use std::path::{Path, PathBuf};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Resource folders
    pub assets: AssetsConfig,

    /// Debug toggles at startup
    pub debug: DebugConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Playfield width in pixels
    pub width: i32,

    /// Playfield height in pixels
    pub height: i32,

    /// Ticks per second
    pub tick_rate: u32,
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Audio enabled
    pub enabled: bool,

    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

/// Resource folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Folder holding the sprite images
    pub images_folder: PathBuf,

    /// Folder holding the sound clips
    pub sounds_folder: PathBuf,
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw bounding boxes
    pub show_bounds: bool,

    /// Dispatch collision reactions
    pub collision_testing: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rock Galaxy".to_string(),
            width: 800,
            height: 600,
            tick_rate: 60,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.7,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            images_folder: PathBuf::from("resources/images"),
            sounds_folder: PathBuf::from("resources/sounds"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_bounds: false,
            collision_testing: true,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load configuration from `path`, or return the defaults
    ///
    /// A missing or malformed file is not an error: the problem is logged
    /// and the defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Could not load {} ({}); using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
