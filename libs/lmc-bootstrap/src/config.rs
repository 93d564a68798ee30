//! Layered application configuration.
//!
//! Sources are merged in this order, later ones winning:
//! 1. built-in defaults
//! 2. YAML file (`--config`)
//! 3. environment variables prefixed `LMC__`, nested with `__`
//!    (e.g. `LMC__SERVER__BIND_ADDR=127.0.0.1:9000`)
//! 4. CLI overrides ([`CliArgs`])

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "LMC__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid bind address '{addr}': {reason}")]
    BindAddr { addr: String, reason: String },

    #[error("invalid config for module '{module}': {reason}")]
    Module { module: String, reason: String },

    #[error("failed to render configuration: {0}")]
    Render(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Largest accepted request body.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    /// Requests running longer than this are answered with 408.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn default_body_limit_bytes() -> usize {
    64 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ServerConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per-module sections, parsed by each module into its own type.
    #[serde(default)]
    pub modules: BTreeMap<String, serde_json::Value>,
}

/// Command line values that take part in config merging.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub verbose: u8,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then `LMC__*` variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingFile`] when an explicit path does not point
    /// to a file, and [`ConfigError::Load`] when a source fails to parse or does
    /// not match the expected shape.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        tracing::debug!(
            file = ?path,
            modules = config.modules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Apply `--port` and `-v` on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::BindAddr`] when the port override is given but the
    /// configured bind address cannot be parsed.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(port) = args.port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        self.logging.apply_verbosity(args.verbose);
        Ok(())
    }

    /// Parsed listener address.
    ///
    /// # Errors
    /// Returns [`ConfigError::BindAddr`] if `server.bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::BindAddr {
                addr: self.server.bind_addr.clone(),
                reason: e.to_string(),
            })
    }

    /// Deserialize the section of `module`, falling back to `T::default()`
    /// when the section is absent.
    ///
    /// # Errors
    /// Returns [`ConfigError::Module`] if the section does not match `T`.
    pub fn module_config<T>(&self, module: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module) {
            None => Ok(T::default()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| ConfigError::Module {
                    module: module.to_owned(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}
