//! Configuration file support for Muster.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/muster/config.toml`.

use crate::types::ViewMode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Fixture data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
        }
    }
}

/// Calendar behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_view")]
    pub default_view: ViewMode,

    /// How many week copies a nutrition plan publishes as
    #[serde(default = "default_nutrition_weeks")]
    pub nutrition_weeks: u32,

    /// Soldier whose nutrition plan is published by default
    #[serde(default = "default_soldier")]
    pub default_soldier: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
            nutrition_weeks: default_nutrition_weeks(),
            default_soldier: default_soldier(),
        }
    }
}

// Default value functions
fn default_fixtures_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("muster").join("fixtures")
}

fn default_view() -> ViewMode {
    ViewMode::Month
}

fn default_nutrition_weeks() -> u32 {
    1
}

fn default_soldier() -> i64 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("muster").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.calendar.default_view, ViewMode::Month);
        assert_eq!(config.calendar.nutrition_weeks, 1);
        assert_eq!(config.calendar.default_soldier, 1);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.calendar.nutrition_weeks,
            parsed.calendar.nutrition_weeks
        );
        assert_eq!(config.data.fixtures_dir, parsed.data.fixtures_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[calendar]
nutrition_weeks = 4
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.calendar.nutrition_weeks, 4);
        assert_eq!(config.calendar.default_view, ViewMode::Month); // default
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.calendar.nutrition_weeks = 2;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.calendar.nutrition_weeks, 2);
    }
}
