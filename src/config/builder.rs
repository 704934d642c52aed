//! Configuration builder
//!
//! Merges configuration from files and environment overrides.

use crate::cli::OutputFormat;
use crate::config::{Config, ConfigFile};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "UPACK_CONFIG";

/// Environment variable overriding `general.verbose`
pub const VERBOSE_ENV: &str = "UPACK_VERBOSE";

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file, or the default locations if `None`
    pub fn with_file(mut self, path: Option<&str>) -> Self {
        let file_config = match path {
            Some(path) => ConfigFile::new(path)
                .read()
                .map_err(|e| log::warn!("{}", e))
                .ok(),
            None => ConfigFile::discover(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        self
    }

    /// Override the verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override the output format
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(f) = format {
            self.config.general.format = f;
        }
        self
    }

    /// Apply `UPACK_CONFIG` and `UPACK_VERBOSE` from the environment
    pub fn with_env(self) -> Self {
        let path = std::env::var(CONFIG_ENV).ok();
        let verbose = std::env::var(VERBOSE_ENV)
            .ok()
            .and_then(|v| parse_env_bool(&v));

        self.with_file(path.as_deref()).with_verbose(verbose)
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => {
            log::warn!("Ignoring {}={}", VERBOSE_ENV, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build();
        assert!(!config.general.verbose);
        assert_eq!(config.general.format, OutputFormat::Table);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_verbose(Some(true))
            .with_format(Some(OutputFormat::Json))
            .build();

        assert!(config.general.verbose);
        assert_eq!(config.general.format, OutputFormat::Json);
    }

    #[test]
    fn test_file_then_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upack.toml");
        std::fs::write(&path, "[general]\nverbose = true\n").unwrap();

        let config = ConfigBuilder::new()
            .with_file(path.to_str())
            .with_verbose(Some(false))
            .build();
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_missing_explicit_file_keeps_defaults() {
        let config = ConfigBuilder::new()
            .with_file(Some("/nonexistent/upack.toml"))
            .build();
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_parse_env_bool() {
        assert_eq!(parse_env_bool("ON"), Some(true));
        assert_eq!(parse_env_bool("0"), Some(false));
        assert_eq!(parse_env_bool("sometimes"), None);
    }
}
