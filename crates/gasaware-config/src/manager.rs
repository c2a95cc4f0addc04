//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::Result,
    types::{AppConfig, ConfigManager as ConfigManagerTrait},
};

/// Default environment prefix
pub const ENV_PREFIX: &str = "GASAWARE";

/// Configuration manager
pub struct ConfigManager {
    /// Optional configuration file path
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Defaults plus environment only
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path. A missing file is not an error.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment prefix
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate in one step
    pub fn load(&mut self) -> Result<AppConfig> {
        let config = self.load_config()?;
        self.validate_config(&config)?;
        Ok(config)
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = &self.config_path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .with_list_parse_key("server.trusted_proxies")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let Some(path) = &self.config_path else {
            return Err(crate::ConfigError::Validation(
                "no configuration file path set".to_string(),
            ));
        };
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        config.validate()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
