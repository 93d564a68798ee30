//! Host bootstrap for LMC processes.
//!
//! Provides layered configuration loading, logging initialization and
//! shutdown signal handling.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{AppConfig, CliArgs, ConfigError, ENV_PREFIX, ServerConfig};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use signals::{ShutdownSignal, shutdown_token, wait_for_shutdown};
