//! Request ID middleware.
//!
//! Every request gets an ID, either the one forwarded by an upstream proxy or
//! a fresh UUID v4. It lands in the `http_request` span, the Sentry scope and
//! the `x-request-id` response header.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest forwarded ID we accept before minting our own.
const MAX_FORWARDED_LEN: usize = 128;

/// Attach a request ID to the span, Sentry scope and response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Use the forwarded header when it is printable and short, else a new UUID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_FORWARDED_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_id_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("edge-42"));
        assert_eq!(resolve_request_id(&headers), "edge-42");
    }

    #[test]
    fn test_missing_or_oversized_id_is_replaced() {
        let generated = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&generated).is_ok());

        let mut headers = HeaderMap::new();
        let long = "x".repeat(MAX_FORWARDED_LEN + 1);
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&long).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        assert_ne!(resolve_request_id(&headers), long);
    }
}
