//! Event service implementation
//!
//! This service handles validated creation, partial updates and deletion of
//! events, including the configured policy for participants of a deleted event.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::DeletePolicy;
use crate::database::DatabaseService;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::models::participant::Participant;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::generate_id;
use crate::utils::logging::{log_event_action, log_rejection};

/// Event service for managing event operations
#[derive(Debug, Clone)]
pub struct EventService {
    database: DatabaseService,
    delete_policy: DeletePolicy,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(database: DatabaseService, delete_policy: DeletePolicy) -> Self {
        Self {
            database,
            delete_policy,
        }
    }

    /// Validate and store a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        debug!(name = %request.name, "Creating event");

        let guard = self.database.lock_writes().await;
        let mut events = self.database.events.list().await?;

        let mut event = Event::new(generate_id(), request, Utc::now())?;
        if events.iter().any(|existing| existing.name == event.name) {
            log_rejection("create_event", &event.name, "duplicate name");
            return Err(EventHubError::Conflict(format!(
                "Event name '{}' must be unique",
                event.name
            )));
        }
        while events.iter().any(|existing| existing.id == event.id) {
            event.id = generate_id();
        }

        events.push(event.clone());
        self.database.events.save_all(&guard, &events).await?;

        log_event_action(&event.id, "created", Some(&event.name));
        Ok(event)
    }

    /// Get every event
    pub async fn find_all(&self) -> Result<Vec<Event>> {
        self.database.events.list().await
    }

    /// Get event by ID
    pub async fn find_one(&self, id: &str) -> Result<Event> {
        self.database
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventHubError::EventNotFound {
                event_id: id.to_string(),
            })
    }

    /// Merge a partial update onto an existing event
    pub async fn update(&self, id: &str, patch: UpdateEventRequest) -> Result<Event> {
        debug!(event_id = id, "Updating event");

        let guard = self.database.lock_writes().await;
        let mut events = self.database.events.list().await?;
        let index = position(&events, id)?;

        if let Some(name) = &patch.name {
            if events.iter().any(|other| &other.name == name && other.id != id) {
                log_rejection("update_event", id, "duplicate name");
                return Err(EventHubError::Conflict(format!(
                    "Event name '{}' must be unique",
                    name
                )));
            }
        }

        let merged = events[index].apply_update(patch, Utc::now())?;
        events[index] = merged.clone();
        self.database.events.save_all(&guard, &events).await?;

        log_event_action(id, "updated", None);
        Ok(merged)
    }

    /// Delete an event, applying the configured participant policy
    pub async fn remove(&self, id: &str) -> Result<()> {
        let guard = self.database.lock_writes().await;
        let mut events = self.database.events.list().await?;
        let index = position(&events, id)?;

        let participants = self.database.participants.list().await?;
        let attached = participants.iter().filter(|p| p.event_id == id).count();
        let live = participants
            .iter()
            .filter(|p| p.event_id == id && p.status.holds_seat())
            .count();

        match self.delete_policy {
            DeletePolicy::Reject if live > 0 => {
                log_rejection("delete_event", id, "participants still registered");
                return Err(EventHubError::Conflict(format!(
                    "Event {} still has {} live participant(s)",
                    id, live
                )));
            }
            DeletePolicy::Cascade if attached > 0 => {
                events.remove(index);
                let remaining: Vec<Participant> = participants
                    .iter()
                    .filter(|p| p.event_id != id)
                    .cloned()
                    .collect();
                self.database
                    .save_both(&guard, &remaining, &participants, &events)
                    .await?;
                info!(event_id = id, removed_participants = attached, "Cascaded event deletion");
            }
            _ => {
                events.remove(index);
                self.database.events.save_all(&guard, &events).await?;
                if attached > 0 {
                    info!(event_id = id, orphaned_participants = attached, "Event deleted, participants left in place");
                }
            }
        }

        log_event_action(id, "deleted", None);
        Ok(())
    }

    /// Participants whose `eventId` points at this event
    pub async fn participants(&self, id: &str) -> Result<Vec<Participant>> {
        self.find_one(id).await?;
        self.database.participants.find_by_event(id).await
    }
}

fn position(events: &[Event], id: &str) -> Result<usize> {
    events
        .iter()
        .position(|event| event.id == id)
        .ok_or_else(|| EventHubError::EventNotFound {
            event_id: id.to_string(),
        })
}
