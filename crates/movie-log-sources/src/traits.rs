use async_trait::async_trait;
use movie_log_models::{MovieDetail, SearchResult};
use tokio_util::sync::CancellationToken;
use crate::error::SourceError;

/// A movie database that can be searched and queried by id.
///
/// Both calls suspend and must honour `cancel`: once it fires the call
/// returns `SourceError::Canceled` and produces no other outcome.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, SourceError>;

    async fn details(
        &self,
        imdb_id: &str,
        cancel: &CancellationToken,
    ) -> Result<MovieDetail, SourceError>;
}
