//! HTTP handlers module
//!
//! This module contains the axum handlers for the event and participant
//! resources and assembles them into a single [`Router`]:
//! - `/event` and `/event/:id` for the event lifecycle
//! - `/event/:id/participant` for registration and per-event listing
//! - `/participant/:id` plus its action routes for the participant lifecycle

pub mod events;
pub mod health;
pub mod participants;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::services::ServiceFactory;
use crate::utils::errors::EventHubError;

/// Build the complete router over shared services
pub fn build_router(services: Arc<ServiceFactory>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/event", get(events::list_events).post(events::create_event))
        .route(
            "/event/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/event/:id/participant",
            get(events::list_event_participants).post(events::register_participant),
        )
        .route(
            "/participant/:id",
            get(participants::get_participant)
                .patch(participants::update_participant)
                .delete(participants::delete_participant),
        )
        .route("/participant/:id/confirm", post(participants::confirm_participant))
        .route("/participant/:id/check-in", post(participants::check_in_participant))
        .route("/participant/:id/cancel", post(participants::cancel_participant))
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}

/// Malformed or incomplete request bodies are validation failures
fn reject_body(rejection: JsonRejection) -> EventHubError {
    EventHubError::Validation(rejection.body_text())
}
