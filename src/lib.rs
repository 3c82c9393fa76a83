//! EventHub
//!
//! Event lifecycle and participant registration service. This library provides
//! the event and participant domain rules, durable JSON collections guarded by
//! a single writer, the services that tie the two together, and an HTTP API.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventHubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::build_router;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
