//! Data models module
//!
//! This module contains the persisted records and the pure domain rules
//! attached to them.

pub mod event;
pub mod participant;
pub mod timestamp;

// Re-export commonly used models
pub use event::{
    CreateEventRequest, Event, EventCategory, EventPriority, EventStatus, UpdateEventRequest,
};
pub use participant::{
    CreateParticipantRequest, Participant, ParticipantStatus, TransitionOutcome,
    UpdateParticipantRequest,
};
