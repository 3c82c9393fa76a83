//! Participant model
//!
//! A participant moves along REGISTERED -> CONFIRMED -> ATTENDED, may be marked
//! NO_SHOW, and may be CANCELLED from any non-terminal state. Nothing leaves a
//! terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::{require_text, validate_email};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    #[default]
    Registered,
    Confirmed,
    Attended,
    NoShow,
    Cancelled,
}

impl ParticipantStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ParticipantStatus::Attended | ParticipantStatus::NoShow | ParticipantStatus::Cancelled
        )
    }

    /// Every status except CANCELLED counts against event capacity.
    pub fn holds_seat(self) -> bool {
        self != ParticipantStatus::Cancelled
    }

    pub fn can_transition_to(self, target: ParticipantStatus) -> bool {
        use ParticipantStatus::*;
        matches!(
            (self, target),
            (Registered, Confirmed)
                | (Registered, NoShow)
                | (Registered, Cancelled)
                | (Confirmed, Attended)
                | (Confirmed, NoShow)
                | (Confirmed, Cancelled)
        )
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParticipantStatus::Registered => "REGISTERED",
            ParticipantStatus::Confirmed => "CONFIRMED",
            ParticipantStatus::Attended => "ATTENDED",
            ParticipantStatus::NoShow => "NO_SHOW",
            ParticipantStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// Persisted participant record. `event_id` is a lookup key only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: ParticipantStatus,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateParticipantRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<ParticipantStatus>,
    pub notes: Option<String>,
}

/// Outcome of a guarded transition: the record after the attempt and whether it moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    pub participant: Participant,
    pub changed: bool,
}

impl Participant {
    pub fn register(
        id: String,
        event_id: String,
        request: CreateParticipantRequest,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_create(&request)?;

        Ok(Self {
            id,
            event_id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            status: ParticipantStatus::Registered,
            registered_at: Some(now),
            joined_at: None,
            notes: request.notes,
            qr_code: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// CONFIRMED -> ATTENDED. Any other starting state is a no-op returning false.
    pub fn check_in(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != ParticipantStatus::Confirmed {
            return false;
        }
        self.status = ParticipantStatus::Attended;
        self.joined_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Move to CANCELLED. Returns true when this released a seat.
    ///
    /// Terminal participants keep their status; only `updated_at` moves.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> bool {
        self.updated_at = now;
        if self.status.is_terminal() {
            return false;
        }
        self.status = ParticipantStatus::Cancelled;
        true
    }

    /// REGISTERED -> CONFIRMED.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != ParticipantStatus::Registered {
            return false;
        }
        self.status = ParticipantStatus::Confirmed;
        self.updated_at = now;
        true
    }

    /// REGISTERED or CONFIRMED -> NO_SHOW.
    pub fn mark_no_show(&mut self, now: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = ParticipantStatus::NoShow;
        self.updated_at = now;
        true
    }

    /// Administrative status change. Returns whether the status moved.
    pub fn transition_to(&mut self, target: ParticipantStatus, now: DateTime<Utc>) -> Result<bool> {
        if self.status == target {
            return Ok(false);
        }
        if !self.status.can_transition_to(target) {
            return Err(EventHubError::InvalidStateTransition {
                from: self.status,
                to: target,
            });
        }

        let moved = match target {
            ParticipantStatus::Confirmed => self.confirm(now),
            ParticipantStatus::Attended => self.check_in(now),
            ParticipantStatus::NoShow => self.mark_no_show(now),
            ParticipantStatus::Cancelled => self.cancel(now),
            ParticipantStatus::Registered => false,
        };
        Ok(moved)
    }

    /// Whole days since registration, floored; 0 when the timestamp is missing.
    pub fn registration_age_days(&self, now: DateTime<Utc>) -> i64 {
        match self.registered_at {
            Some(registered_at) => (now - registered_at)
                .num_milliseconds()
                .div_euclid(MILLIS_PER_DAY),
            None => 0,
        }
    }

    /// Merge an administrative patch. Status changes go through the state machine.
    pub fn apply_update(&self, patch: UpdateParticipantRequest, now: DateTime<Utc>) -> Result<Self> {
        let mut merged = self.clone();

        if let Some(name) = patch.name {
            require_text("name", &name)?;
            merged.name = name;
        }
        if let Some(email) = patch.email {
            validate_email(&email)?;
            merged.email = email;
        }
        if let Some(phone) = patch.phone {
            merged.phone = Some(phone);
        }
        if let Some(notes) = patch.notes {
            merged.notes = Some(notes);
        }
        if let Some(status) = patch.status {
            merged.transition_to(status, now)?;
        }

        merged.updated_at = now;
        Ok(merged)
    }
}

pub fn validate_create(request: &CreateParticipantRequest) -> Result<()> {
    require_text("userId", &request.user_id)?;
    require_text("name", &request.name)?;
    validate_email(&request.email)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn participant() -> Participant {
        let request = CreateParticipantRequest {
            user_id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            notes: None,
        };
        Participant::register("p-1".to_string(), "evt-1".to_string(), request, now()).unwrap()
    }

    #[test]
    fn test_register_starts_registered() {
        let p = participant();
        assert_eq!(p.status, ParticipantStatus::Registered);
        assert_eq!(p.registered_at, Some(now()));
        assert!(p.joined_at.is_none());
        assert!(p.qr_code.is_none());
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let request = CreateParticipantRequest {
            user_id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            notes: None,
        };
        assert_matches!(validate_create(&request), Err(EventHubError::Validation(_)));
    }

    #[test]
    fn test_check_in_requires_confirmation() {
        let mut p = participant();
        let before = p.clone();
        assert!(!p.check_in(now() + Duration::hours(1)));
        assert_eq!(p, before);

        assert!(p.confirm(now()));
        let later = now() + Duration::hours(2);
        assert!(p.check_in(later));
        assert_eq!(p.status, ParticipantStatus::Attended);
        assert_eq!(p.joined_at, Some(later));
        assert_eq!(p.updated_at, later);

        assert!(!p.check_in(later));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut p = participant();
        assert!(p.cancel(now()));
        assert_eq!(p.status, ParticipantStatus::Cancelled);

        let snapshot = p.clone();
        let later = now() + Duration::minutes(5);
        assert!(!p.cancel(later));
        assert_eq!(p.status, ParticipantStatus::Cancelled);
        assert_eq!(p.updated_at, later);
        assert_eq!(Participant { updated_at: snapshot.updated_at, ..p }, snapshot);
    }

    #[test]
    fn test_cancel_does_not_leave_attended() {
        let mut p = participant();
        p.confirm(now());
        p.check_in(now());
        assert!(!p.cancel(now()));
        assert_eq!(p.status, ParticipantStatus::Attended);
    }

    #[test]
    fn test_transition_rules() {
        let mut p = participant();
        assert_matches!(
            p.transition_to(ParticipantStatus::Attended, now()),
            Err(EventHubError::InvalidStateTransition { .. })
        );
        assert!(p.transition_to(ParticipantStatus::Confirmed, now()).unwrap());
        assert!(!p.transition_to(ParticipantStatus::Confirmed, now()).unwrap());
        assert!(p.transition_to(ParticipantStatus::Attended, now()).unwrap());
        assert!(p.joined_at.is_some());
        assert_matches!(
            p.transition_to(ParticipantStatus::Registered, now()),
            Err(EventHubError::InvalidStateTransition { .. })
        );
    }

    #[test]
    fn test_no_show_from_registered() {
        let mut p = participant();
        assert!(p.mark_no_show(now()));
        assert!(p.status.is_terminal());
        assert!(p.status.holds_seat());
        assert!(!p.confirm(now()));
    }

    #[test]
    fn test_registration_age_days() {
        let p = participant();
        assert_eq!(p.registration_age_days(now()), 0);
        assert_eq!(p.registration_age_days(now() + Duration::hours(47)), 1);
        assert_eq!(p.registration_age_days(now() + Duration::days(10)), 10);

        let mut missing = p.clone();
        missing.registered_at = None;
        assert_eq!(missing.registration_age_days(now() + Duration::days(10)), 0);
    }

    #[test]
    fn test_update_applies_fields_and_status() {
        let p = participant();
        let patch = UpdateParticipantRequest {
            phone: Some("+49 30 1234567".to_string()),
            status: Some(ParticipantStatus::Confirmed),
            ..Default::default()
        };
        let updated = p.apply_update(patch, now()).unwrap();
        assert_eq!(updated.phone.as_deref(), Some("+49 30 1234567"));
        assert_eq!(updated.status, ParticipantStatus::Confirmed);
        assert_eq!(updated.name, p.name);
    }

    #[test]
    fn test_wire_format_and_round_trip() {
        let mut p = participant();
        p.status = ParticipantStatus::NoShow;
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["status"], "NO_SHOW");
        assert_eq!(value["eventId"], "evt-1");
        assert!(value["joinedAt"].is_null());

        let list = vec![p.clone(), participant()];
        let decoded: Vec<Participant> =
            serde_json::from_str(&serde_json::to_string(&list).unwrap()).unwrap();
        assert_eq!(decoded, list);
    }
}
