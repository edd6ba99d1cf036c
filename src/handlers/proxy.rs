use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::cors::allow_any_origin;
use crate::identity::{client_key, marker_key};
use crate::metrics::{REJECTED_TOTAL, REQUEST_TOTAL};
use crate::proxy::forward;
use crate::rate_limit::Admission;
use crate::state::AppState;
use crate::worker::Marker;

use super::preflight_response;

// Rejection for a client over its window limit. Retry-After is the full
// window, not the time remaining in it.
pub fn rejection_response(window: Duration) -> Response {
    let mut response = (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response();
    let headers = response.headers_mut();
    allow_any_origin(headers);
    headers.insert(header::RETRY_AFTER, HeaderValue::from(window.as_secs()));
    response
}

// Catch-all handler: preflight -> admission -> marker -> forward
pub async fn proxy_handler(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight_response();
    }

    REQUEST_TOTAL.inc();

    let key = client_key(request.headers());
    let window = state.rate_limiter.window();

    if state.rate_limiter.admit(&key, state.clock.now()) == Admission::Rejected {
        REJECTED_TOTAL.inc();
        info!(client = %key, "rate limit exceeded");
        return rejection_response(window);
    }

    // fire and forget, the response never waits on the shared store
    state.markers.enqueue(Marker {
        key: marker_key(&state.marker_prefix, &key),
        ttl: window,
    });

    match forward(&state.client, &state.upstream, request.into_body()).await {
        Ok(response) => response,
        Err(e) => {
            warn!(client = %key, error = %e, "upstream request failed");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_retry_after_and_cors() {
        let response = rejection_response(Duration::from_secs(60));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
