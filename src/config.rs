//! Configuration loading and management
//!
//! A store is located by a data directory and a file name inside it. Both
//! have defaults; an optional TOML file can override either.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default directory holding the task file, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default task file name
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Store location configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the task file; relative paths resolve against the
    /// current working directory
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the task file within `data_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Config {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Absolute data directory
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if self.data_dir.is_absolute() {
            return Ok(self.data_dir.clone());
        }
        Ok(std::env::current_dir()?.join(&self.data_dir))
    }

    /// Absolute path of the task file
    pub fn file_path(&self) -> Result<PathBuf> {
        self.validate()?;
        Ok(self.resolved_data_dir()?.join(&self.file_name))
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(Error::InvalidConfig("file_name cannot be empty".to_string()));
        }
        if name != self.file_name {
            return Err(Error::InvalidConfig(format!(
                "file_name must not have leading or trailing whitespace: '{}'",
                self.file_name
            )));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(Error::InvalidConfig(format!(
                "file_name must not contain a path separator: '{}'",
                self.file_name
            )));
        }
        if name == "." || name == ".." {
            return Err(Error::InvalidConfig(format!(
                "file_name must name a file: '{}'",
                self.file_name
            )));
        }
        Ok(())
    }
}
