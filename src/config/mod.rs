//! Configuration management module
//!
//! This module handles loading and validation of application configuration
//! from defaults, TOML/YAML files and environment variables.

pub mod settings;
pub mod validation;

pub use settings::{DeletePolicy, LoggingConfig, PolicyConfig, ServerConfig, Settings, StorageConfig};
