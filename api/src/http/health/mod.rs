use axum::extract::State;
use board_core::domain::health::{entities::IsHealthy, port::HealthService};

use crate::http::server::{ApiError, AppState, Response};

pub mod routes;

pub async fn health_check(State(state): State<AppState>) -> Result<Response<IsHealthy>, ApiError> {
    let health = state.service.check_health().await?;
    Ok(Response::ok(health))
}
