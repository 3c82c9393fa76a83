//! Error handling for EventHub
//!
//! This module defines the main error type used throughout the application
//! and maps every variant onto a stable machine-readable code and HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::participant::ParticipantStatus;
use crate::utils::response::error as error_response;

/// Main error type for EventHub
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: String },

    #[error("Event {event_id} is full (capacity {capacity})")]
    CapacityExceeded { event_id: String, capacity: u32 },

    #[error("Registration is closed for event {event_id}")]
    RegistrationClosed { event_id: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: ParticipantStatus,
        to: ParticipantStatus,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),
}

/// Result type alias for EventHub operations
pub type Result<T> = std::result::Result<T, EventHubError>;

impl EventHubError {
    /// Check if the error is recoverable by retrying the same operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventHubError::Io(_) => true,
            EventHubError::Storage(_) => true,
            EventHubError::Validation(_)
            | EventHubError::Conflict(_)
            | EventHubError::EventNotFound { .. }
            | EventHubError::ParticipantNotFound { .. }
            | EventHubError::CapacityExceeded { .. }
            | EventHubError::RegistrationClosed { .. }
            | EventHubError::InvalidStateTransition { .. }
            | EventHubError::Serialization(_)
            | EventHubError::Config(_)
            | EventHubError::ConfigLoad(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::Storage(_) => ErrorSeverity::Critical,
            EventHubError::Serialization(_) => ErrorSeverity::Critical,
            EventHubError::Config(_) | EventHubError::ConfigLoad(_) => ErrorSeverity::Critical,
            EventHubError::Io(_) => ErrorSeverity::Error,
            EventHubError::Conflict(_)
            | EventHubError::CapacityExceeded { .. }
            | EventHubError::RegistrationClosed { .. }
            | EventHubError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Info,
        }
    }

    /// Stable machine-readable error kind
    pub fn code(&self) -> &'static str {
        match self {
            EventHubError::Validation(_) => "VALIDATION_ERROR",
            EventHubError::Conflict(_) => "CONFLICT",
            EventHubError::EventNotFound { .. } | EventHubError::ParticipantNotFound { .. } => {
                "NOT_FOUND"
            }
            EventHubError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            EventHubError::RegistrationClosed { .. } => "REGISTRATION_CLOSED",
            EventHubError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            EventHubError::Storage(_) | EventHubError::Serialization(_) | EventHubError::Io(_) => {
                "STORAGE_ERROR"
            }
            EventHubError::Config(_) | EventHubError::ConfigLoad(_) => "CONFIG_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EventHubError::Validation(_) => StatusCode::BAD_REQUEST,
            EventHubError::EventNotFound { .. } | EventHubError::ParticipantNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            EventHubError::Conflict(_)
            | EventHubError::CapacityExceeded { .. }
            | EventHubError::RegistrationClosed { .. }
            | EventHubError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            EventHubError::Storage(_)
            | EventHubError::Serialization(_)
            | EventHubError::Io(_)
            | EventHubError::Config(_)
            | EventHubError::ConfigLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API clients
    pub fn public_message(&self) -> String {
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                "An internal storage error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    fn log(&self) {
        match self.severity() {
            ErrorSeverity::Info => info!(code = self.code(), error = %self, "Request rejected"),
            ErrorSeverity::Warning => warn!(code = self.code(), error = %self, "Request rejected"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(code = self.code(), error = ?self, severity = %self.severity(), "Internal error")
            }
        }
    }
}

impl IntoResponse for EventHubError {
    fn into_response(self) -> Response {
        self.log();
        error_response(self.code(), self.public_message(), None, self.status_code())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
