//! Integration tests for the SolarSpark storefront.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot`, so
//! no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p solarspark-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart mutations, notices and checkout
//! - `storefront_catalog` - Listing filters, detail pages and health

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use solarspark_core::Catalog;
use solarspark_storefront::{config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// A response with its body read into memory.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// One shopper's browser: the storefront router plus a cookie jar holding
/// the session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with the builtin catalog and an instant checkout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_checkout_delay(Duration::ZERO)
    }

    #[must_use]
    pub fn with_checkout_delay(delay: Duration) -> Self {
        let config = StorefrontConfig {
            checkout_delay: delay,
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, Catalog::builtin());

        Self {
            router: solarspark_storefront::app(state),
            cookie: None,
        }
    }

    /// A second shopper sharing nothing with this one.
    #[must_use]
    pub fn fresh_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(path);
        self.send(request, Body::empty()).await
    }

    /// Post an url-encoded form.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = form_body(fields);
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Url-encoded `key=value` pairs joined with `&`.
#[must_use]
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
