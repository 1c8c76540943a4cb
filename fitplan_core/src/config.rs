//! Configuration file support for fitplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitplan/config.toml`.

use crate::{Catalog, Error, Level, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Session lengths the front ends accept, in minutes
pub const DURATION_RANGE_MINUTES: RangeInclusive<u32> = 5..=60;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub guide: GuideConfig,
}

/// Selection used when the command line does not say otherwise
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_group")]
    pub group: String,

    #[serde(default = "default_level")]
    pub level: Level,

    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            level: default_level(),
            duration_minutes: default_duration_minutes(),
        }
    }
}

/// Exercise catalog location
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// External catalog file replacing the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Simulated guided timer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Wall-clock milliseconds per simulated second
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

// Default value functions
fn default_group() -> String {
    "Box Breathing".into()
}

fn default_level() -> Level {
    Level::Beginner
}

fn default_duration_minutes() -> u32 {
    15
}

fn default_tick_millis() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
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
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("Cannot locate config directory: HOME is not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("fitplan").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
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

    /// Check values a config file could get wrong
    pub fn validate(&self) -> Result<()> {
        if !DURATION_RANGE_MINUTES.contains(&self.defaults.duration_minutes) {
            return Err(Error::Config(format!(
                "defaults.duration_minutes must be between {} and {}, got {}",
                DURATION_RANGE_MINUTES.start(),
                DURATION_RANGE_MINUTES.end(),
                self.defaults.duration_minutes
            )));
        }
        if self.defaults.group.trim().is_empty() {
            return Err(Error::Config("defaults.group must not be empty".into()));
        }
        if self.guide.tick_millis > 1000 {
            return Err(Error::Config(format!(
                "guide.tick_millis must be at most 1000, got {}",
                self.guide.tick_millis
            )));
        }
        Ok(())
    }

    /// The catalog this configuration points at
    ///
    /// Falls back to the built-in table when no path is set.
    pub fn load_catalog(&self) -> Result<Cow<'static, Catalog>> {
        match self.catalog.path {
            Some(ref path) => Ok(Cow::Owned(Catalog::load_from(path)?)),
            None => Ok(Cow::Borrowed(crate::catalog::default_catalog())),
        }
    }
}
