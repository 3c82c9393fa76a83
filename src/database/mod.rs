//! Database module
//!
//! This module owns the durable collections: the store backends, one
//! repository per collection, and the service that serialises writers.

pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use repositories::{EventRepository, ParticipantRepository};
pub use service::{DatabaseService, WriteGuard};
pub use store::{JsonFileStore, MemoryStore, RecordStore, SharedStore};
