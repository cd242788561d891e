use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dump::DumpFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default)]
    pub dump: DumpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for the `dumplist` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Directory prepended to every dumped path
    #[serde(default)]
    pub directory: Option<String>,

    /// Extension appended to every dumped path, e.g. ".bmp"
    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default)]
    pub format: DumpFormat,
}

fn default_protocol() -> String {
    "all".to_string()
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            directory: None,
            extension: None,
            protocol: default_protocol(),
            format: DumpFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Write logs to daily files in this directory instead of stderr
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Send logs to systemd-journald (Linux only)
    #[serde(default)]
    pub journald: bool,
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arface")
        .join("arface.sql3")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            dump: DumpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load from `$ARFACE_CONFIG` or the default location. A missing file
    /// means defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Location of the database file; `$ARFACE_DB` wins over the config.
    pub fn db_path(&self) -> PathBuf {
        match std::env::var_os("ARFACE_DB") {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.db_path.clone(),
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("arface")
    }

    fn config_path() -> PathBuf {
        match std::env::var_os("ARFACE_CONFIG") {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::config_dir().join("config.toml"),
        }
    }
}
