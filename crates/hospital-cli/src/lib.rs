//! Configuration and logging setup for the `hospital` command-line tool.

pub mod config;
pub mod logging;

pub use config::{ApiBackend, AppConfig, ConfigError};
