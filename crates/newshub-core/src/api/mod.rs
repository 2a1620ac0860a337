mod client;
mod session;
mod views;

pub use client::{Credentials, NewsClient};
pub use session::{Session, SessionStore};
pub use views::ViewLatch;

use crate::feed::Article;
use crate::Result;

/// Anything that can hand out the article collection and record article views
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch the full article collection
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    /// Fetch a single article by id
    async fn fetch_article(&self, id: &str) -> Result<Article>;

    /// Bump the view counter of an article.
    ///
    /// Callers should go through [`ViewLatch::record_view`] so a view is only
    /// counted once per viewing session.
    async fn increment_view(&self, id: &str) -> Result<()>;
}
