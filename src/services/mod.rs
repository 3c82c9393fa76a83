//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod participant;

// Re-export commonly used services
pub use event::EventService;
pub use participant::ParticipantService;

use crate::config::{DeletePolicy, Settings};
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub participant_service: ParticipantService,
    pub database: DatabaseService,
}

impl ServiceFactory {
    /// Create a ServiceFactory backed by the JSON file collections from settings
    pub fn new(settings: &Settings) -> Self {
        let database = DatabaseService::from_config(&settings.storage);
        Self::with_database(database, settings.policy.event_delete)
    }

    /// Create a ServiceFactory over an already constructed database
    pub fn with_database(database: DatabaseService, delete_policy: DeletePolicy) -> Self {
        Self {
            event_service: EventService::new(database.clone(), delete_policy),
            participant_service: ParticipantService::new(database.clone()),
            database,
        }
    }

    /// Health check for the storage backing all services
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
