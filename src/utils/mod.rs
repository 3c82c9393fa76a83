//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, the HTTP response envelope and
//! helper functions.

pub mod errors;
pub mod helpers;
pub mod logging;
pub mod response;

pub use errors::{EventHubError, Result};
