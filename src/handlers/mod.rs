mod health;
mod metrics;
mod preflight;
mod proxy;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use preflight::preflight_response;
pub use proxy::{proxy_handler, rejection_response};
