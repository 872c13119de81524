//! Session-related types.
//!
//! The session is the shopper's durable per-browser storage: it holds the
//! serialized cart and the notices waiting to be shown.

use serde::{Deserialize, Serialize};
use solarspark_core::CartNotice;

/// Severity of a flashed notice, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A short title/description pair shown once on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    #[must_use]
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Warning,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Error,
        }
    }

    /// CSS modifier for the notice level.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

impl From<CartNotice> for Notice {
    fn from(notice: CartNotice) -> Self {
        Self {
            title: notice.title().to_string(),
            description: notice.description().to_string(),
            level: NoticeLevel::Info,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the serialized cart lines.
    pub use solarspark_core::CART_STORAGE_KEY as CART;

    /// Key for notices waiting to be rendered.
    pub const NOTICES: &str = "notices";
}
