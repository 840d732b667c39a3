use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cache-invalidation notification emitted by write paths after a mutation
/// succeeds. The read layer never depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationEvent {
    /// Route path whose cached rendering is now stale, e.g. "/profile/edit".
    pub path: String,
}

impl RevalidationEvent {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Receiver for revalidation events.
///
/// Implementations forward to whatever cache the embedding application keeps;
/// delivery is best-effort and must not fail the originating write.
#[async_trait]
pub trait RevalidationSink: Send + Sync {
    async fn revalidate(&self, event: RevalidationEvent);
}

/// Sink that drops every event. Default when no cache exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl RevalidationSink for NullSink {
    async fn revalidate(&self, _event: RevalidationEvent) {}
}
