//! Configuration settings for crudgen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::defaults;
use crate::error::{CrudgenError, Result};

/// Main configuration struct for the generator service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP API binds to (`host:port`)
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Root directory holding every generated project and its archive
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Timeout for opening the introspection connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_bind_address() -> String {
    defaults::BIND_ADDRESS.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_connect_timeout_secs() -> u64 {
    defaults::CONNECT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            output_dir: default_output_dir(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_level: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content).map_err(|e| {
            CrudgenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        // CRUDGEN_OUTPUT_DIR, CRUDGEN_BIND_ADDRESS, ...
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX).try_parsing(true));

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parsed bind address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            CrudgenError::ConfigError(format!(
                "Invalid bind_address '{}': {}",
                self.bind_address, e
            ))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(CrudgenError::ConfigError("output_dir is required".into()));
        }

        if self.connect_timeout_secs == 0 {
            return Err(CrudgenError::ConfigError(
                "connect_timeout_secs must be greater than zero".into(),
            ));
        }

        self.socket_addr()?;

        Ok(())
    }
}
