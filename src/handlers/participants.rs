//! Participant resource handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use super::reject_body;
use crate::models::participant::UpdateParticipantRequest;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::response::{empty_success, success};

/// GET /participant/:id
pub async fn get_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let participant = services.participant_service.find_one(&id).await?;
    Ok(success(participant, "OK"))
}

/// PATCH /participant/:id
pub async fn update_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateParticipantRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(patch) = payload.map_err(reject_body)?;
    let participant = services.participant_service.update(&id, patch).await?;
    Ok(success(participant, "Participant updated"))
}

/// POST /participant/:id/confirm
pub async fn confirm_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let outcome = services.participant_service.confirm(&id).await?;
    let message = if outcome.changed {
        "Participant confirmed"
    } else {
        "Participant not in REGISTERED state, nothing changed"
    };
    Ok(success(outcome, message))
}

/// POST /participant/:id/check-in
pub async fn check_in_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let outcome = services.participant_service.check_in(&id).await?;
    let message = if outcome.changed {
        "Participant checked in"
    } else {
        "Participant not in CONFIRMED state, nothing changed"
    };
    Ok(success(outcome, message))
}

/// POST /participant/:id/cancel
pub async fn cancel_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let participant = services.participant_service.cancel(&id).await?;
    Ok(success(participant, "Participant cancelled"))
}

/// DELETE /participant/:id
pub async fn delete_participant(
    State(services): State<Arc<ServiceFactory>>,
    Path(id): Path<String>,
) -> Result<Response> {
    services.participant_service.remove(&id).await?;
    Ok(empty_success("Participant removed"))
}
