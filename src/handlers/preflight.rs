use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::cors::preflight_headers;
use crate::metrics::PREFLIGHT_TOTAL;

// Answers CORS preflight without touching the limiter or the upstream
pub fn preflight_response() -> Response {
    PREFLIGHT_TOTAL.inc();
    (StatusCode::NO_CONTENT, preflight_headers()).into_response()
}
