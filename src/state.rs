use std::sync::Arc;
use crate::clock::{Clock, SystemClock};
use crate::rate_limit::WindowCounterStore;
use crate::worker::MarkerQueue;

// Where admitted requests go
#[derive(Clone)]
pub struct Upstream {
    pub url: String,
    pub api_key: String,
}

// app's shared state

pub struct AppState {
    pub client: reqwest::Client,
    pub upstream: Upstream,
    pub rate_limiter: Arc<WindowCounterStore>,
    pub markers: MarkerQueue,
    pub marker_prefix: String,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        client: reqwest::Client,
        upstream: Upstream,
        rate_limiter: Arc<WindowCounterStore>,
        markers: MarkerQueue,
    ) -> Self {
        Self {
            client,
            upstream,
            rate_limiter,
            markers,
            marker_prefix: "rl".to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }
}
