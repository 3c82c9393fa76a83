//! Database repositories module
//!
//! Each repository is the single owner of one logical collection; every read
//! and write of that collection goes through it.

pub mod event;
pub mod participant;

// Re-export repositories
pub use event::EventRepository;
pub use participant::ParticipantRepository;
