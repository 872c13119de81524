//! Domain models for storefront.
//!
//! Only session-scoped types live here; products and carts come from
//! `solarspark-core`.

pub mod session;

pub use session::{Notice, NoticeLevel, keys as session_keys};
