use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::response::success;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// GET /health
pub async fn health_check(State(services): State<Arc<ServiceFactory>>) -> Result<Response> {
    services.health_check().await?;

    let payload = HealthPayload {
        status: "ok",
        service: crate::NAME,
        version: crate::VERSION,
    };
    Ok(success(payload, "Health check successful"))
}
