//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - The focus duration, restricted to the preset allow-list
//! - Notification settings (enabled, volume)
//!
//! Break durations are fixed and never persisted. Configuration is stored at
//! `~/.config/focusbell/config.toml` and loaded once at startup; a missing or
//! unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::{DurationTable, FOCUS_PRESETS_MIN};

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusbell/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_focus_minutes() -> u64 {
    25
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    50
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            volume: default_volume(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location. A missing, unreadable, or invalid
    /// file yields the defaults -- startup never fails on configuration.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Duration table seeded from the stored preference.
    pub fn duration_table(&self) -> DurationTable {
        DurationTable::new(self.timer.focus_minutes)
    }

    /// Accept a preset focus duration, or return false leaving the
    /// configuration unchanged.
    pub fn set_focus_minutes(&mut self, minutes: u64) -> bool {
        if !FOCUS_PRESETS_MIN.contains(&minutes) {
            return false;
        }
        self.timer.focus_minutes = minutes;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.timer.focus_minutes, 25);
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.volume, 50);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        assert!(config.set_focus_minutes(45));
        config.notifications.volume = 80;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.focus_minutes, 45);
        assert_eq!(loaded.notifications.volume, 80);
        assert!(loaded.notifications.enabled);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nfocus_minutes = 60\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.focus_minutes, 60);
        assert_eq!(loaded.notifications.volume, 50);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml {{{").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn out_of_list_preset_leaves_config_unchanged() {
        let mut config = Config::default();
        assert!(!config.set_focus_minutes(30));
        assert_eq!(config.timer.focus_minutes, 25);
    }

    #[test]
    fn stored_garbage_yields_default_table() {
        let mut config = Config::default();
        config.timer.focus_minutes = 7; // hand-edited file
        assert_eq!(config.duration_table().focus_minutes(), 25);
    }
}
