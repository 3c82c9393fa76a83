//! Database service layer
//!
//! Bundles both collections behind one write lock. Every mutating operation
//! holds the lock for its whole load -> validate -> save cycle, which makes
//! read-modify-write of the shared collections race free.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::config::StorageConfig;
use crate::database::store::{JsonFileStore, MemoryStore, RecordStore};
use crate::database::{EventRepository, ParticipantRepository};
use crate::models::{Event, Participant};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub participants: ParticipantRepository,
    write_lock: Arc<Mutex<()>>,
}

/// Proof that the caller holds the single writer slot.
///
/// Only [`DatabaseService::lock_writes`] hands these out, and every
/// collection write demands one.
pub struct WriteGuard<'a> {
    _slot: MutexGuard<'a, ()>,
}

impl DatabaseService {
    pub fn new(
        events: Arc<dyn RecordStore<Event>>,
        participants: Arc<dyn RecordStore<Participant>>,
    ) -> Self {
        Self {
            events: EventRepository::new(events),
            participants: ParticipantRepository::new(participants),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// JSON file collections as described by the storage configuration
    pub fn from_config(config: &StorageConfig) -> Self {
        let events = JsonFileStore::<Event>::new(
            config.events_path(),
            config.max_retries,
            config.retry_backoff(),
        );
        let participants = JsonFileStore::<Participant>::new(
            config.participants_path(),
            config.max_retries,
            config.retry_backoff(),
        );
        info!(
            events = %events.path().display(),
            participants = %participants.path().display(),
            "Using JSON file storage"
        );

        Self::new(Arc::new(events), Arc::new(participants))
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Event>::new("events")),
            Arc::new(MemoryStore::<Participant>::new("participants")),
        )
    }

    /// Wait for the single writer slot
    pub async fn lock_writes(&self) -> WriteGuard<'_> {
        WriteGuard {
            _slot: self.write_lock.lock().await,
        }
    }

    /// Persist both collections as one unit.
    ///
    /// Participants are written first. If the event write then fails, the
    /// participant collection is put back to `participants_before`.
    pub async fn save_both(
        &self,
        guard: &WriteGuard<'_>,
        participants: &[Participant],
        participants_before: &[Participant],
        events: &[Event],
    ) -> Result<()> {
        self.participants.save_all(guard, participants).await?;

        if let Err(e) = self.events.save_all(guard, events).await {
            if let Err(rollback) = self.participants.save_all(guard, participants_before).await {
                error!(
                    error = %e,
                    rollback_error = %rollback,
                    "Failed to restore participants after event write failure"
                );
            } else {
                error!(error = %e, "Event write failed, participant changes rolled back");
            }
            return Err(e);
        }

        Ok(())
    }

    /// Check both collections can be read
    pub async fn health_check(&self) -> Result<()> {
        futures::try_join!(self.events.list(), self.participants.list())?;
        Ok(())
    }
}
