//! One-shot notices carried across redirects.
//!
//! Cart mutations redirect back to a page; the notice they produce is parked
//! in the session and drained by the next full page render.

use tower_sessions::Session;

use crate::models::{Notice, session_keys};

/// Queue a notice for the next page render.
///
/// Failures are logged and dropped; a lost notice never fails the request.
pub async fn push(session: &Session, notice: impl Into<Notice>) {
    let mut pending: Vec<Notice> = session
        .get(session_keys::NOTICES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(notice.into());

    if let Err(e) = session.insert(session_keys::NOTICES, pending).await {
        tracing::warn!(error = %e, "Failed to queue notice");
    }
}

/// Remove and return every queued notice.
pub async fn take(session: &Session) -> Vec<Notice> {
    match session.remove::<Vec<Notice>>(session_keys::NOTICES).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read queued notices");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use solarspark_core::CartNotice;
    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_push_then_take_drains_in_order() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        push(&session, CartNotice::ItemAdded).await;
        push(&session, Notice::warning("Maximum quantity reached", "Only 2 left")).await;

        let notices = take(&session).await;
        let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Item added to cart", "Maximum quantity reached"]);

        assert!(take(&session).await.is_empty());
    }
}
