//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::utils::errors::{EventHubError, Result};

/// Maximum length of an event name, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Generate a new opaque record id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reject empty or whitespace-only required text
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EventHubError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<()> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let pattern = EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });

    if !pattern.is_match(email) {
        return Err(EventHubError::Validation(format!(
            "email '{}' is not a valid address",
            email
        )));
    }
    Ok(())
}
