//! Configuration file discovery
//!
//! Files are tried from the most general to the most local location; the
//! first one that parses is used.

use crate::config::Config;
use crate::error::ConfigError;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SYSTEM_CONFIG: &str = "/etc/upack/config.toml";
const USER_CONFIG: &str = ".config/upack/config.toml";
const LOCAL_CONFIGS: [&str; 2] = ["upack.toml", ".upack.toml"];

/// A TOML configuration file at a known path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file
    pub fn read(&self) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(self.path.display().to_string()),
            _ => ConfigError::Unreadable {
                path: self.path.display().to_string(),
                source: e,
            },
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Candidate files in search order
    pub fn search_order() -> Vec<ConfigFile> {
        let home = dirs::home_dir().map(|home| home.join(USER_CONFIG));
        std::iter::once(PathBuf::from(SYSTEM_CONFIG))
            .chain(home)
            .chain(LOCAL_CONFIGS.iter().map(PathBuf::from))
            .map(ConfigFile::new)
            .collect()
    }

    /// The first candidate that exists and parses; broken files are skipped
    /// with a warning
    pub fn discover() -> Option<Config> {
        Self::search_order().iter().find_map(|file| match file.read() {
            Ok(config) => {
                log::info!("Loaded config from {}", file.path.display());
                Some(config)
            }
            Err(ConfigError::FileNotFound(_)) => None,
            Err(e) => {
                log::warn!("Ignoring {}: {}", file.path.display(), e);
                None
            }
        })
    }
}
