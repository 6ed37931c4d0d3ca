//! User settings for the loot views.
//!
//! Settings live in a TOML file with a `[view]` table for the loot menu and a
//! `[recent_loot]` table for the recent-loot widget. Every key is optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Complete settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LootConfig {
    pub view: ViewConfig,
    pub recent_loot: RecentLootConfig,
}

/// Loot menu payload options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Attach classification data to each payload.
    pub extended_data: bool,
    /// Attach an icon to each payload.
    pub icons: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            extended_data: true,
            icons: true,
        }
    }
}

/// Which way new recent-loot messages push the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListDirection {
    #[default]
    Down,
    Up,
}

impl ListDirection {
    pub fn code(self) -> u32 {
        match self {
            ListDirection::Down => 0,
            ListDirection::Up => 1,
        }
    }
}

/// Recent-loot widget options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentLootConfig {
    pub enabled: bool,
    /// Messages kept on screen at once.
    pub max_messages: u32,
    /// Seconds each message stays visible.
    pub message_duration: f32,
    /// Widget opacity in `0.0..=1.0`.
    pub opacity: f32,
    pub direction: ListDirection,
}

impl Default for RecentLootConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_messages: 5,
            message_duration: 3.0,
            opacity: 1.0,
            direction: ListDirection::Down,
        }
    }
}

/// Load settings from `path`, falling back to defaults if the file is missing
/// or malformed.
pub fn load_config(path: &Path) -> LootConfig {
    match try_load_config(path) {
        Ok(config) => {
            info!("loot settings loaded from '{}'", path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load loot settings from '{}': {:#}. Using defaults.",
                path.display(),
                e
            );
            LootConfig::default()
        },
    }
}

fn try_load_config(path: &Path) -> Result<LootConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading loot settings from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing loot settings from '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("[view]\nicons = false\n\n[recent_loot]\nmax_messages = 8\ndirection = \"up\"\n");
        let config = load_config(file.path());
        assert!(config.view.extended_data);
        assert!(!config.view.icons);
        assert_eq!(config.recent_loot.max_messages, 8);
        assert_eq!(config.recent_loot.direction, ListDirection::Up);
        assert_eq!(config.recent_loot.message_duration, 3.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("[view\nicons = maybe");
        assert_eq!(load_config(file.path()), LootConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("loot.toml"));
        assert_eq!(config, LootConfig::default());
    }
}
