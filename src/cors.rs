use axum::http::{HeaderMap, HeaderValue, header};

pub const ALLOW_ANY_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;

// Overwrites whatever allow-origin the upstream sent
pub fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ANY_ORIGIN));
}

pub fn preflight_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    allow_any_origin(&mut headers);
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(PREFLIGHT_MAX_AGE_SECS));
    headers
}
