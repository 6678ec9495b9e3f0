use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::settings::{AccentColor, FontChoice, Minutes, Settings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Start-up defaults. Every field is optional; missing ones keep the built-in value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pomodoro: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
    pub color: Option<AccentColor>,
    pub font: Option<FontChoice>,
}

impl Config {
    /// Layer this config over `base`. Durations are clamped into range.
    pub fn apply_to(&self, base: Settings) -> Settings {
        let mut settings = base;
        if let Some(m) = self.pomodoro {
            settings.durations.pomodoro = Minutes::new(m);
        }
        if let Some(m) = self.short_break {
            settings.durations.short_break = Minutes::new(m);
        }
        if let Some(m) = self.long_break {
            settings.durations.long_break = Minutes::new(m);
        }
        if let Some(color) = self.color {
            settings.color = color;
        }
        if let Some(font) = self.font {
            settings.font = font;
        }
        settings
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Read-only JSON config file. Applied settings are never written back.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("pomo_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
