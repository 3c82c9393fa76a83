//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventHub application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::utils::errors::{EventHubError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .build(&config.directory)
        .map_err(|e| {
            EventHubError::Config(format!(
                "Cannot open log directory {}: {}",
                config.directory, e
            ))
        })?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EventHubError::Config(format!("Invalid log filter: {}", e)))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking);
    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
            .try_init()
    };
    installed.map_err(|e| EventHubError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        details = details,
        "Event action performed"
    );
}

/// Log participant lifecycle actions
pub fn log_participant_action(
    participant_id: &str,
    event_id: &str,
    action: &str,
    details: Option<&str>,
) {
    info!(
        participant_id = participant_id,
        event_id = event_id,
        action = action,
        details = details,
        "Participant action performed"
    );
}

/// Log business-rule rejections
pub fn log_rejection(operation: &str, target_id: &str, reason: &str) {
    warn!(
        operation = operation,
        target_id = target_id,
        reason = reason,
        "Operation rejected"
    );
}

/// Log storage operations
pub fn log_storage_operation(
    operation: &str,
    collection: &str,
    records: usize,
    duration_ms: u64,
    success: bool,
) {
    if success {
        debug!(
            operation = operation,
            collection = collection,
            records = records,
            duration_ms = duration_ms,
            "Storage operation completed"
        );
    } else {
        error!(
            operation = operation,
            collection = collection,
            records = records,
            duration_ms = duration_ms,
            "Storage operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_unusable_log_directory_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            directory: blocker.join("logs").to_string_lossy().into_owned(),
            file_prefix: "eventhub.log".to_string(),
            json: false,
        };

        assert_matches!(
            init_logging(&config).err(),
            Some(EventHubError::Config(msg)) if msg.contains("log directory")
        );
    }
}
