use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::cors::allow_any_origin;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
    #[error("durable store error: {0}")]
    Store(#[from] redis::RedisError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::UpstreamTimeout(err)
        } else {
            GatewayError::Upstream(err)
        }
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        // details stay in the logs, clients get a fixed message
        let body = match status {
            StatusCode::GATEWAY_TIMEOUT => "Upstream timed out",
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            _ => "Internal error",
        };
        let mut response = (status, body).into_response();
        allow_any_origin(response.headers_mut());
        response
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
