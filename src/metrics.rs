use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("gateway_requests_total", "Total number of proxied requests").unwrap();
    pub static ref REJECTED_TOTAL: Counter =
        register_counter!("gateway_rejected_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref PREFLIGHT_TOTAL: Counter =
        register_counter!("gateway_preflight_total", "CORS preflight requests answered").unwrap();
    pub static ref UPSTREAM_ERRORS: Counter =
        register_counter!("gateway_upstream_errors_total", "Upstream transport failures").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "gateway_upstream_latency_seconds",
        "Time until upstream response headers in seconds"
    )
    .unwrap();
    pub static ref MARKER_FAILURES: Counter =
        register_counter!("gateway_marker_failures_total", "Durable marker writes that failed").unwrap();
    pub static ref MARKER_DROPPED: Counter =
        register_counter!("gateway_marker_dropped_total", "Durable markers dropped on a full queue").unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("gateway_tracked_clients", "Client keys with a window entry").unwrap();
}
