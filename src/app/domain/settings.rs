use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_host_width")]
    pub host_width: i32,

    #[serde(default = "default_host_height")]
    pub host_height: i32,

    /// Upper bound on the idle wait between two frames
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Per-window override of the registry's default visibility, keyed by
    /// window name
    #[serde(default)]
    pub visible_windows: BTreeMap<String, bool>,
}

fn default_host_width() -> i32 {
    640
}

fn default_host_height() -> i32 {
    480
}

fn default_frame_interval_ms() -> u64 {
    16 // ~60 frames per second
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host_width: default_host_width(),
            host_height: default_host_height(),
            frame_interval_ms: default_frame_interval_ms(),
            visible_windows: BTreeMap::new(),
        }
    }
}

impl AppSettings {
    /// Whether a window should be open at startup, falling back to the
    /// registry default when the user never changed it.
    pub fn is_visible_at_startup(&self, name: &str, default_visible: bool) -> bool {
        self.visible_windows
            .get(name)
            .copied()
            .unwrap_or(default_visible)
    }

    pub fn set_visible_at_startup(&mut self, name: &str, visible: bool) {
        self.visible_windows.insert(name.to_string(), visible);
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        match Self::get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("{e}. Using default settings.");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path. A missing file yields defaults
    /// (and tries to write them); a corrupt file yields defaults untouched.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!("Could not write default settings: {e}");
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!("Settings saved to {}", path.display());

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| AppError::Settings("no config directory on this platform".to_string()))?;
        path.push("prometheus");
        path.push("settings.json");
        Ok(path)
    }
}
