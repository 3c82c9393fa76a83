//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from defaults, config files and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub policy: PolicyConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JSON collection storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub events_file: String,
    pub participants_file: String,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    pub json: bool,
}

/// Business policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    pub event_delete: DeletePolicy,
}

/// What happens to participants when their event is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete an event while any participant still holds a seat.
    /// Cancelled records do not block and stay in place.
    #[default]
    Reject,
    /// Delete the event's participants together with the event
    Cascade,
    /// Delete the event and leave participant references dangling
    Orphan,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("EVENTHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventHubError> {
        super::validation::validate_settings(self)
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, crate::utils::errors::EventHubError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            crate::utils::errors::EventHubError::Config(format!(
                "Invalid listen address {}:{}: {}",
                self.host, self.port, e
            ))
        })
    }
}

impl StorageConfig {
    pub fn events_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.events_file)
    }

    pub fn participants_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.participants_file)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            storage: StorageConfig {
                data_dir: "data".to_string(),
                events_file: "events.json".to_string(),
                participants_file: "participants.json".to_string(),
                max_retries: 3,
                retry_backoff_ms: 50,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_prefix: "eventhub.log".to_string(),
                json: false,
            },
            policy: PolicyConfig {
                event_delete: DeletePolicy::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_paths() {
        let settings = Settings::default();
        assert_eq!(
            settings.storage.events_path(),
            PathBuf::from("data").join("events.json")
        );
        assert_eq!(settings.policy.event_delete, DeletePolicy::Reject);
        assert_eq!(settings.server.socket_addr().unwrap().port(), 3001);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        std::env::set_var("EVENTHUB__SERVER__PORT", "8088");
        std::env::set_var("EVENTHUB__POLICY__EVENT_DELETE", "cascade");
        let settings = Settings::new();
        std::env::remove_var("EVENTHUB__SERVER__PORT");
        std::env::remove_var("EVENTHUB__POLICY__EVENT_DELETE");

        let settings = settings.unwrap();
        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.policy.event_delete, DeletePolicy::Cascade);
        assert_eq!(settings.storage.max_retries, 3);
    }

    #[test]
    #[serial]
    fn test_new_without_sources_uses_defaults() {
        let settings = Settings::new().unwrap();
        assert_eq!(settings.storage.data_dir, "data");
        assert_eq!(settings.logging.level, "info");
    }
}
