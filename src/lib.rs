//! Rate-limited streaming proxy in front of a chat-completion API.
//!
//! Every request outside `/_gateway/` goes through the same pipeline:
//! CORS preflight is answered locally, everything else is admitted or
//! rejected by a per-client fixed-window counter and, when admitted, streamed
//! to the upstream and back.

pub mod clock;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod metrics;
pub mod proxy;
pub mod rate_limit;
pub mod state;
pub mod store;
pub mod worker;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handlers::{health_handler, metrics_handler, proxy_handler};
use crate::state::AppState;

pub use crate::error::{GatewayError, Result};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/_gateway/health", get(health_handler))
        .route("/_gateway/metrics", get(metrics_handler))
        // other methods on the reserved paths take the normal pipeline
        .method_not_allowed_fallback(proxy_handler)
        .fallback(proxy_handler)
        .with_state(state)
}
