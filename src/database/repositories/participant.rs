//! Participant repository implementation

use std::sync::Arc;

use crate::database::service::WriteGuard;
use crate::database::store::{RecordStore, SharedStore};
use crate::models::participant::Participant;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct ParticipantRepository {
    store: SharedStore<Participant>,
}

impl ParticipantRepository {
    pub fn new(store: Arc<dyn RecordStore<Participant>>) -> Self {
        Self { store }
    }

    /// Load the whole collection
    pub async fn list(&self) -> Result<Vec<Participant>> {
        self.store.load_all().await
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Participant>> {
        let participants = self.store.load_all().await?;
        Ok(participants.into_iter().find(|p| p.id == id))
    }

    /// Get participants registered against an event, oldest registration first
    pub async fn find_by_event(&self, event_id: &str) -> Result<Vec<Participant>> {
        let mut participants: Vec<Participant> = self
            .store
            .load_all()
            .await?
            .into_iter()
            .filter(|p| p.event_id == event_id)
            .collect();
        participants.sort_by_key(|p| p.registered_at.unwrap_or(p.created_at));
        Ok(participants)
    }

    /// Replace the whole collection; only callable while holding the write lock
    pub async fn save_all(&self, _guard: &WriteGuard<'_>, participants: &[Participant]) -> Result<()> {
        self.store.save_all(participants).await
    }

    pub fn collection(&self) -> &str {
        self.store.name()
    }
}

impl std::fmt::Debug for ParticipantRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantRepository")
            .field("collection", &self.collection())
            .finish()
    }
}
