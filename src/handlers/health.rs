use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    timestamp: String,
    tracked_clients: usize,
}

// health handler
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthReport {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        tracked_clients: state.rate_limiter.len(),
    })
}
