//! Participant service implementation
//!
//! This service handles registration against an event's capacity, the
//! check-in/cancel lifecycle, and administrative updates. Any change that
//! takes or releases a seat writes both collections as one unit.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::database::{DatabaseService, WriteGuard};
use crate::models::participant::{
    self, CreateParticipantRequest, Participant, TransitionOutcome, UpdateParticipantRequest,
};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::generate_id;
use crate::utils::logging::{log_participant_action, log_rejection};

/// Participant service for managing registrations
#[derive(Debug, Clone)]
pub struct ParticipantService {
    database: DatabaseService,
}

impl ParticipantService {
    /// Create a new ParticipantService instance
    pub fn new(database: DatabaseService) -> Self {
        Self { database }
    }

    /// Register a participant and take a seat on the event
    pub async fn register(
        &self,
        event_id: &str,
        request: CreateParticipantRequest,
    ) -> Result<Participant> {
        debug!(event_id = event_id, user_id = %request.user_id, "Registering participant");

        let guard = self.database.lock_writes().await;
        let mut events = self.database.events.list().await?;
        let event = events
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| EventHubError::EventNotFound {
                event_id: event_id.to_string(),
            })?;
        participant::validate_create(&request)?;

        let now = Utc::now();
        if !event.is_registration_open(now) {
            log_rejection("register", event_id, "registration closed");
            return Err(EventHubError::RegistrationClosed {
                event_id: event_id.to_string(),
            });
        }

        let participants = self.database.participants.list().await?;
        let duplicate = participants.iter().any(|p| {
            p.event_id == event_id && p.user_id == request.user_id && p.status.holds_seat()
        });
        if duplicate {
            log_rejection("register", event_id, "user already registered");
            return Err(EventHubError::Conflict(format!(
                "User {} is already registered for event {}",
                request.user_id, event_id
            )));
        }

        if let Err(e) = event.add_participant(now) {
            log_rejection("register", event_id, "event full");
            return Err(e);
        }

        let mut id = generate_id();
        while participants.iter().any(|p| p.id == id) {
            id = generate_id();
        }
        let registered = Participant::register(id, event_id.to_string(), request, now)?;

        let mut updated = participants.clone();
        updated.push(registered.clone());
        self.database
            .save_both(&guard, &updated, &participants, &events)
            .await?;

        log_participant_action(&registered.id, event_id, "registered", None);
        Ok(registered)
    }

    /// Get participant by ID
    pub async fn find_one(&self, id: &str) -> Result<Participant> {
        self.database
            .participants
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Get participants registered against an event
    pub async fn find_by_event(&self, event_id: &str) -> Result<Vec<Participant>> {
        self.database.participants.find_by_event(event_id).await
    }

    /// REGISTERED -> CONFIRMED
    pub async fn confirm(&self, id: &str) -> Result<TransitionOutcome> {
        self.guarded_transition(id, "confirmed", Participant::confirm)
            .await
    }

    /// CONFIRMED -> ATTENDED; a no-op from any other state
    pub async fn check_in(&self, id: &str) -> Result<TransitionOutcome> {
        self.guarded_transition(id, "checked_in", Participant::check_in)
            .await
    }

    /// Cancel a registration and release its seat if it held one
    pub async fn cancel(&self, id: &str) -> Result<Participant> {
        let guard = self.database.lock_writes().await;
        let before = self.database.participants.list().await?;
        let mut after = before.clone();
        let index = position(&after, id)?;

        let now = Utc::now();
        let released = after[index].cancel(now);
        let cancelled = after[index].clone();

        if released {
            self.persist_release(&guard, &after, &before, &cancelled.event_id, now)
                .await?;
        } else {
            self.database.participants.save_all(&guard, &after).await?;
        }

        let details = if released { None } else { Some("already terminal") };
        log_participant_action(id, &cancelled.event_id, "cancelled", details);
        Ok(cancelled)
    }

    /// Administrative update; a status move into CANCELLED releases the seat
    pub async fn update(&self, id: &str, patch: UpdateParticipantRequest) -> Result<Participant> {
        let guard = self.database.lock_writes().await;
        let before = self.database.participants.list().await?;
        let mut after = before.clone();
        let index = position(&after, id)?;

        let now = Utc::now();
        let previous = after[index].status;
        let merged = after[index].apply_update(patch, now)?;
        let released = previous.holds_seat() && !merged.status.holds_seat();
        after[index] = merged.clone();

        if released {
            self.persist_release(&guard, &after, &before, &merged.event_id, now)
                .await?;
        } else {
            self.database.participants.save_all(&guard, &after).await?;
        }

        log_participant_action(id, &merged.event_id, "updated", None);
        Ok(merged)
    }

    /// Hard delete; releases the seat if the participant still held one
    pub async fn remove(&self, id: &str) -> Result<()> {
        let guard = self.database.lock_writes().await;
        let before = self.database.participants.list().await?;
        let mut after = before.clone();
        let index = position(&after, id)?;
        let removed = after.remove(index);

        if removed.status.holds_seat() {
            self.persist_release(&guard, &after, &before, &removed.event_id, Utc::now())
                .await?;
        } else {
            self.database.participants.save_all(&guard, &after).await?;
        }

        log_participant_action(id, &removed.event_id, "deleted", None);
        Ok(())
    }

    async fn guarded_transition(
        &self,
        id: &str,
        action: &str,
        transition: fn(&mut Participant, DateTime<Utc>) -> bool,
    ) -> Result<TransitionOutcome> {
        let guard = self.database.lock_writes().await;
        let mut participants = self.database.participants.list().await?;
        let index = position(&participants, id)?;

        let changed = transition(&mut participants[index], Utc::now());
        let participant = participants[index].clone();
        if changed {
            self.database.participants.save_all(&guard, &participants).await?;
            log_participant_action(id, &participant.event_id, action, None);
        } else {
            debug!(participant_id = id, status = %participant.status, action = action, "Transition not applicable");
        }

        Ok(TransitionOutcome {
            participant,
            changed,
        })
    }

    /// Write participant changes together with one released seat on their event
    async fn persist_release(
        &self,
        guard: &WriteGuard<'_>,
        after: &[Participant],
        before: &[Participant],
        event_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut events = self.database.events.list().await?;
        match events.iter_mut().find(|event| event.id == event_id) {
            Some(event) => {
                event.remove_participant(now);
                self.database.save_both(guard, after, before, &events).await
            }
            None => {
                warn!(event_id = event_id, "Participant references a missing event, no seat to release");
                self.database.participants.save_all(guard, after).await
            }
        }
    }
}

fn position(participants: &[Participant], id: &str) -> Result<usize> {
    participants
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> EventHubError {
    EventHubError::ParticipantNotFound {
        participant_id: id.to_string(),
    }
}
