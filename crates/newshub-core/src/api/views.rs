use std::collections::HashSet;

use uuid::Uuid;

use super::NewsSource;
use crate::Result;

/// One-shot guard so an article's view is counted at most once per viewing session.
///
/// The latch is owned by the caller. Feed derivation never touches it.
#[derive(Debug)]
pub struct ViewLatch {
    session_id: Uuid,
    claimed: HashSet<String>,
}

impl Default for ViewLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLatch {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            claimed: HashSet::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns `true` the first time `article_id` is claimed, `false` afterwards
    pub fn claim(&mut self, article_id: &str) -> bool {
        self.claimed.insert(article_id.to_string())
    }

    /// Record a view through `source` unless this session already did.
    ///
    /// The latch is claimed before the request goes out, so a failed
    /// increment is not retried within the same session.
    pub async fn record_view<S>(&mut self, source: &S, article_id: &str) -> Result<bool>
    where
        S: NewsSource + ?Sized,
    {
        if !self.claim(article_id) {
            tracing::debug!(
                session = %self.session_id,
                "View of {} already recorded",
                article_id
            );
            return Ok(false);
        }

        source.increment_view(article_id).await?;
        tracing::debug!(session = %self.session_id, "Recorded view of {}", article_id);
        Ok(true)
    }
}
