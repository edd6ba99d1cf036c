//! Single-shot streaming forward to the upstream completion endpoint.
//!
//! Neither body is buffered: the inbound body is handed to reqwest as a
//! stream, and the upstream body is handed back to axum as a stream. Dropping
//! the returned response drops the upstream stream and with it the upstream
//! connection.

use axum::body::Body;
use axum::http::{HeaderMap, header};
use axum::response::Response;
use futures_util::StreamExt;
use std::time::Instant;
use tracing::{debug, warn};

use crate::cors::allow_any_origin;
use crate::error::{GatewayError, Result};
use crate::metrics::{UPSTREAM_ERRORS, UPSTREAM_LATENCY};
use crate::state::Upstream;

// Connection-scoped headers that must not be relayed
const HOP_BY_HOP: [&str; 5] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "upgrade",
];

pub async fn forward(
    client: &reqwest::Client,
    upstream: &Upstream,
    body: Body,
) -> Result<Response> {
    let start_time = Instant::now();

    let result = client
        .post(&upstream.url)
        .bearer_auth(&upstream.api_key)
        .header(header::CONTENT_TYPE, "application/json")
        // responses are per request, never let an edge cache share them
        .header(header::CACHE_CONTROL, "no-cache, no-store")
        .header(header::PRAGMA, "no-cache")
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await;

    let upstream_res = match result {
        Ok(res) => res,
        Err(e) => {
            UPSTREAM_ERRORS.inc();
            return Err(GatewayError::from(e));
        }
    };
    UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let status = upstream_res.status();
    debug!(%status, "upstream responded");

    let mut headers = upstream_res.headers().clone();
    strip_hop_by_hop(&mut headers);
    allow_any_origin(&mut headers);

    let stream = upstream_res.bytes_stream().inspect(|chunk| {
        if let Err(e) = chunk {
            UPSTREAM_ERRORS.inc();
            warn!(error = %e, "upstream body stream failed");
        }
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // headers named by `Connection` are hop-by-hop too
    let named: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    for name in HOP_BY_HOP.iter().copied().chain(named.iter().map(String::as_str)) {
        headers.remove(name);
    }
}
