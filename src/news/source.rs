use async_trait::async_trait;
use crate::error::Result;
use crate::models::RawArticle;

/// Anything that can answer a topic search with raw article records, in the
/// order the backend ranked them.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str, credential: &str) -> Result<Vec<RawArticle>>;
    fn name(&self) -> &str;
}
