use axum::http::HeaderMap;

// Headers set by the fronting proxy, in order of trust
pub const CLIENT_IP_HEADERS: [&str; 2] = ["cf-connecting-ip", "x-real-ip"];

// Shared bucket for requests with no usable identity
pub const ANONYMOUS: &str = "anon";

// Client key for rate limiting. Not validated as an IP; forgeable if the
// fronting proxy passes these headers through from clients.
pub fn client_key(headers: &HeaderMap) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}

pub fn marker_key(prefix: &str, client_key: &str) -> String {
    format!("{}:{}", prefix, client_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cf_header_wins_over_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        headers.insert("cf-connecting-ip", HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn empty_header_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static(""));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_key(&headers), "10.0.0.2");
    }

    #[test]
    fn missing_headers_share_anon_bucket() {
        assert_eq!(client_key(&HeaderMap::new()), ANONYMOUS);
    }

    #[test]
    fn marker_key_is_namespaced() {
        assert_eq!(marker_key("rl", "203.0.113.7"), "rl:203.0.113.7");
    }
}
