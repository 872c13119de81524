//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (records into the request span, echoes the header)
//! 4. Session layer (tower-sessions with in-memory store)
//! 5. Security headers (CSP, frame and referrer policy)
//!
//! The [`ShopperCart`] extractor hydrates the cart store from the session
//! inside handlers.

pub mod cart;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use cart::{PageChrome, ShopperCart};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
