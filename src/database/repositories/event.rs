//! Event repository implementation

use std::sync::Arc;

use crate::database::service::WriteGuard;
use crate::database::store::{RecordStore, SharedStore};
use crate::models::event::Event;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct EventRepository {
    store: SharedStore<Event>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn RecordStore<Event>>) -> Self {
        Self { store }
    }

    /// Load the whole collection
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.store.load_all().await
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        let events = self.store.load_all().await?;
        Ok(events.into_iter().find(|event| event.id == id))
    }

    /// Replace the whole collection; only callable while holding the write lock
    pub async fn save_all(&self, _guard: &WriteGuard<'_>, events: &[Event]) -> Result<()> {
        self.store.save_all(events).await
    }

    pub fn collection(&self) -> &str {
        self.store.name()
    }
}

impl std::fmt::Debug for EventRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRepository")
            .field("collection", &self.collection())
            .finish()
    }
}
