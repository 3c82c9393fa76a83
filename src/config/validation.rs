//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{EventHubError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(EventHubError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(EventHubError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    config.socket_addr()?;

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.data_dir.is_empty() {
        return Err(EventHubError::Config(
            "Storage data directory is required".to_string(),
        ));
    }

    if config.events_file.is_empty() || config.participants_file.is_empty() {
        return Err(EventHubError::Config(
            "Storage collection file names are required".to_string(),
        ));
    }

    if config.events_file == config.participants_file {
        return Err(EventHubError::Config(
            "Events and participants must be stored in different files".to_string(),
        ));
    }

    if config.max_retries == 0 {
        return Err(EventHubError::Config(
            "Storage max_retries must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventHubError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventHubError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if config.file_prefix.is_empty() {
        return Err(EventHubError::Config(
            "Log file prefix is required".to_string(),
        ));
    }

    Ok(())
}
