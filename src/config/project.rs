use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigData;
use crate::error::{ConfigError, RefreshResult};

pub const CONFIG_FILE_NAME: &str = "webrefresh.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub data: ConfigData,
    pub path: PathBuf,
}

impl Config {
    /// Loads `webrefresh.toml` from the target root, falling back to defaults.
    ///
    /// When `root` is a single file the config is looked up next to it.
    pub fn load_or_default(root: impl AsRef<Path>) -> RefreshResult<Self> {
        let config_path = Self::config_path(root.as_ref());

        let data = if config_path.is_file() {
            let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?
        } else {
            ConfigData::default()
        };

        Ok(Self {
            data,
            path: config_path,
        })
    }

    /// Writes a default config unless one already exists. Returns the path
    /// and whether a new file was created.
    pub fn init(root: impl AsRef<Path>) -> RefreshResult<(PathBuf, bool)> {
        let config_path = Self::config_path(root.as_ref());
        if config_path.exists() {
            return Ok((config_path, false));
        }

        let config = Self {
            data: ConfigData::default(),
            path: config_path.clone(),
        };
        config.save()?;

        Ok((config_path, true))
    }

    pub fn save(&self) -> RefreshResult<()> {
        let content = toml::to_string_pretty(&self.data).map_err(ConfigError::from)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;

        Ok(())
    }

    fn config_path(root: &Path) -> PathBuf {
        if root.is_file() {
            root.parent()
                .unwrap_or_else(|| Path::new("."))
                .join(CONFIG_FILE_NAME)
        } else {
            root.join(CONFIG_FILE_NAME)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: ConfigData::default(),
            path: PathBuf::from(CONFIG_FILE_NAME),
        }
    }
}
