use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SETTLE_MS: u64 = 300;
pub const DEFAULT_TICK_MS: u64 = 30;
pub const MAX_SETTLE_MS: u64 = 5_000;
pub const MAX_TICK_MS: u64 = 1_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Delay between a decision and the next card, in milliseconds
    pub settle_ms: u64,
    /// UI redraw interval, in milliseconds
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_ms > MAX_SETTLE_MS {
            return Err(ConfigError::Invalid(format!(
                "settle_ms must be at most {MAX_SETTLE_MS}, got {}",
                self.settle_ms
            )));
        }
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::Invalid(format!(
                "tick_ms must be between 1 and {MAX_TICK_MS}, got {}",
                self.tick_ms
            )));
        }
        Ok(())
    }

    /// Apply command line overrides on top of stored values
    pub fn with_overrides(self, settle_ms: Option<u64>, tick_ms: Option<u64>) -> Self {
        Self {
            settle_ms: settle_ms.unwrap_or(self.settle_ms),
            tick_ms: tick_ms.unwrap_or(self.tick_ms),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "swipedeck") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("swipedeck_config.json")
        };
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

    /// Like `load`, but reports why the stored config could not be used.
    /// A missing file is not an error.
    pub fn try_load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }

        let bytes = fs::read(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let cfg: Config =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        self.try_load().unwrap_or_else(|err| {
            warn!(%err, "falling back to default config");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        cfg.validate()?;
        // Serialize first so a failure never leaves a truncated file behind
        let data = serde_json::to_vec_pretty(cfg).map_err(ConfigError::Serialize)?;
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, data).map_err(write_err)
    }
}
