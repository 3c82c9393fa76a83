//! Event model
//!
//! Plain data record plus the pure rules that govern it: seat accounting,
//! the registration window, and the create/update invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timestamp;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::{require_text, MAX_NAME_LENGTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Upcoming => "UPCOMING",
            EventStatus::Ongoing => "ONGOING",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Conference,
    Workshop,
    Seminar,
    Networking,
    Training,
    Social,
    Sports,
    Entertainment,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Persisted event record. Field names are the on-disk and on-wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: EventStatus,
    pub category: EventCategory,
    pub priority: EventPriority,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub capacity: u32,
    #[serde(default)]
    pub current_participants: u32,
    pub organizer: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub registration_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<EventStatus>,
    pub category: EventCategory,
    pub priority: EventPriority,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub capacity: i64,
    pub organizer: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub registration_deadline: DateTime<Utc>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub priority: Option<EventPriority>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub organizer: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl Event {
    /// Build a fresh event from a creation request, enforcing every create-time invariant.
    pub fn new(id: String, request: CreateEventRequest, now: DateTime<Utc>) -> Result<Self> {
        validate_create(&request)?;
        let capacity = to_capacity(request.capacity)?;

        Ok(Self {
            id,
            name: request.name,
            description: request.description,
            status: request.status.unwrap_or_default(),
            category: request.category,
            priority: request.priority,
            start_date: request.start_date,
            end_date: request.end_date,
            location: request.location,
            capacity,
            current_participants: 0,
            organizer: request.organizer,
            registration_deadline: Some(request.registration_deadline),
            created_at: now,
            updated_at: now,
        })
    }

    /// Seats still free; never negative even when stored counts overshoot.
    pub fn available_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.current_participants)
    }

    pub fn is_registration_open(&self, now: DateTime<Utc>) -> bool {
        if matches!(self.status, EventStatus::Cancelled | EventStatus::Completed) {
            return false;
        }
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => false,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// Take one seat.
    pub fn add_participant(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.current_participants >= self.capacity {
            return Err(EventHubError::CapacityExceeded {
                event_id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        self.current_participants += 1;
        self.updated_at = now;
        Ok(())
    }

    /// Release one seat, floored at zero.
    pub fn remove_participant(&mut self, now: DateTime<Utc>) {
        self.current_participants = self.current_participants.saturating_sub(1);
        self.updated_at = now;
    }

    /// Merge a patch onto this event and return the result.
    ///
    /// Only the invariants whose inputs appear in the patch are re-checked, so
    /// a partial update never has to resubmit the whole date window.
    pub fn apply_update(&self, patch: UpdateEventRequest, now: DateTime<Utc>) -> Result<Self> {
        let mut merged = self.clone();

        let window_touched = patch.start_date.is_some() || patch.end_date.is_some();
        let deadline_touched = patch.start_date.is_some() || patch.registration_deadline.is_some();

        if let Some(name) = patch.name {
            validate_name(&name)?;
            merged.name = name;
        }
        if let Some(description) = patch.description {
            require_text("description", &description)?;
            merged.description = description;
        }
        if let Some(location) = patch.location {
            require_text("location", &location)?;
            merged.location = location;
        }
        if let Some(organizer) = patch.organizer {
            require_text("organizer", &organizer)?;
            merged.organizer = organizer;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(priority) = patch.priority {
            merged.priority = priority;
        }
        if let Some(start) = patch.start_date {
            merged.start_date = start;
        }
        if let Some(end) = patch.end_date {
            merged.end_date = end;
        }
        if let Some(deadline) = patch.registration_deadline {
            merged.registration_deadline = Some(deadline);
        }
        if let Some(capacity) = patch.capacity {
            let capacity = to_capacity(capacity)?;
            if capacity < merged.current_participants {
                return Err(EventHubError::Validation(format!(
                    "capacity {} is below the {} participants already registered",
                    capacity, merged.current_participants
                )));
            }
            merged.capacity = capacity;
        }

        if window_touched {
            validate_window(merged.start_date, merged.end_date)?;
        }
        if deadline_touched {
            if let Some(deadline) = merged.registration_deadline {
                validate_deadline(deadline, merged.start_date)?;
            }
        }

        merged.updated_at = now;
        Ok(merged)
    }
}

/// All create-time checks except name uniqueness, which needs the whole collection.
pub fn validate_create(request: &CreateEventRequest) -> Result<()> {
    validate_name(&request.name)?;
    require_text("description", &request.description)?;
    require_text("location", &request.location)?;
    require_text("organizer", &request.organizer)?;
    validate_window(request.start_date, request.end_date)?;
    validate_deadline(request.registration_deadline, request.start_date)?;
    to_capacity(request.capacity)?;
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    require_text("name", name)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(EventHubError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if start >= end {
        return Err(EventHubError::Validation(
            "startDate must be before endDate".to_string(),
        ));
    }
    Ok(())
}

fn validate_deadline(deadline: DateTime<Utc>, start: DateTime<Utc>) -> Result<()> {
    if deadline > start {
        return Err(EventHubError::Validation(
            "registrationDeadline must be on or before startDate".to_string(),
        ));
    }
    Ok(())
}

fn to_capacity(capacity: i64) -> Result<u32> {
    if capacity <= 0 {
        return Err(EventHubError::Validation("capacity must be > 0".to_string()));
    }
    u32::try_from(capacity)
        .map_err(|_| EventHubError::Validation(format!("capacity must be at most {}", u32::MAX)))
}
