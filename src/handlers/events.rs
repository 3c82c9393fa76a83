//! Event resource handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use tracing::debug;

use super::reject_body;
use crate::models::event::{CreateEventRequest, UpdateEventRequest};
use crate::models::participant::CreateParticipantRequest;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::response::{created, empty_success, success};

/// POST /event
pub async fn create_event(
    State(services): State<Arc<ServiceFactory>>,
    payload: std::result::Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(reject_body)?;
    let event = services.event_service.create(request).await?;
    Ok(created(event, "Event created"))
}

/// GET /event
pub async fn list_events(State(services): State<Arc<ServiceFactory>>) -> Result<Response> {
    let events = services.event_service.find_all().await?;
    debug!(count = events.len(), "Listing events");
    Ok(success(events, "OK"))
}

/// GET /event/:id
pub async fn get_event(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let event = services.event_service.find_one(&id).await?;
    Ok(success(event, "OK"))
}

/// PATCH /event/:id
pub async fn update_event(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(patch) = payload.map_err(reject_body)?;
    let event = services.event_service.update(&id, patch).await?;
    Ok(success(event, "Event updated"))
}

/// DELETE /event/:id
pub async fn delete_event(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    services.event_service.remove(&id).await?;
    Ok(empty_success("Event removed"))
}

/// POST /event/:id/participant
pub async fn register_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CreateParticipantRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(reject_body)?;
    let participant = services.participant_service.register(&id, request).await?;
    Ok(created(participant, "Participant registered"))
}

/// GET /event/:id/participant
pub async fn list_event_participants(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let participants = services.event_service.participants(&id).await?;
    Ok(success(participants, "OK"))
}
