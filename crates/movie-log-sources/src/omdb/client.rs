use async_trait::async_trait;
use movie_log_config::OmdbConfig;
use movie_log_models::{MovieDetail, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Client for the OMDb HTTP API
#[derive(Clone)]
pub struct OmdbClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Client over reqwest, with the configured request timeout
    pub fn from_config(config: &OmdbConfig, api_key: String) -> Result<Self, SourceError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new(Arc::new(transport), config.base_url.clone(), api_key))
    }

    /// Run the request unless `cancel` fires first. Losing the race drops the
    /// transport future, which aborts the request in flight.
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<HttpResponse, SourceError> {
        if cancel.is_cancelled() {
            return Err(SourceError::Canceled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("OMDb request canceled before completion");
                Err(SourceError::Canceled)
            }
            result = self.transport.get(url) => result,
        }
    }

    pub async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<SearchResult>, SourceError> {
        debug!(query = %query, "Searching OMDb");
        let url = api::search_url(&self.base_url, &self.api_key, query);
        let response = self.fetch(&url, cancel).await?;
        let results = api::decode_search(&response)?;
        info!(query = %query, results = results.len(), "OMDb search completed");
        Ok(results)
    }

    pub async fn details(&self, imdb_id: &str, cancel: &CancellationToken) -> Result<MovieDetail, SourceError> {
        debug!(imdb_id = %imdb_id, "Fetching OMDb details");
        let url = api::detail_url(&self.base_url, &self.api_key, imdb_id);
        let response = self.fetch(&url, cancel).await?;
        api::decode_detail(&response, imdb_id)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<SearchResult>, SourceError> {
        OmdbClient::search(self, query, cancel).await
    }

    async fn details(&self, imdb_id: &str, cancel: &CancellationToken) -> Result<MovieDetail, SourceError> {
        OmdbClient::details(self, imdb_id, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replies with a canned response and records requested URLs
    struct CannedTransport {
        response: Result<HttpResponse, SourceError>,
        urls: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse { status, body: body.to_string() }),
                urls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Never answers; flags when the pending request future is dropped
    struct HangingTransport {
        started: AtomicUsize,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl HttpTransport for HangingTransport {
        async fn get(&self, _url: &str) -> Result<HttpResponse, SourceError> {
            let _guard = DropFlag(self.dropped.clone());
            self.started.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    fn client(transport: Arc<dyn HttpTransport>) -> OmdbClient {
        OmdbClient::new(transport, "https://omdb.test/", "secret")
    }

    #[tokio::test]
    async fn test_search_builds_request_and_decodes() {
        let transport = Arc::new(CannedTransport::new(
            200,
            r#"{"Search":[{"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
        ));
        let omdb = client(transport.clone());

        let results = omdb.search("the matrix", &CancellationToken::new()).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix");
        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls.as_slice(), ["https://omdb.test/?apikey=secret&s=the%20matrix"]);
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let transport = Arc::new(CannedTransport::new(200, r#"{"Response":"False","Error":"Movie not found!"}"#));

        let err = client(transport).search("zzzzzz", &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[tokio::test]
    async fn test_search_http_failure() {
        let transport = Arc::new(CannedTransport::new(500, "oops"));

        let err = client(transport).search("matrix", &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let transport = Arc::new(CannedTransport {
            response: Err(SourceError::Network("connection refused".to_string())),
            urls: Mutex::new(Vec::new()),
        });

        let err = client(transport).details("tt1", &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, SourceError::Network("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_already_canceled_token_skips_request() {
        let transport = Arc::new(CannedTransport::new(200, r#"{"Response":"True","Search":[]}"#));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client(transport.clone()).search("matrix", &cancel).await.unwrap_err();

        assert!(err.is_canceled());
        assert!(transport.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let dropped = Arc::new(AtomicBool::new(false));
        let transport = Arc::new(HangingTransport {
            started: AtomicUsize::new(0),
            dropped: dropped.clone(),
        });
        let omdb = client(transport.clone());
        let cancel = CancellationToken::new();

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { omdb.search("matrix", &cancel).await })
        };
        while transport.started.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        cancel.cancel();

        let outcome = task.await.unwrap();
        assert_eq!(outcome, Err(SourceError::Canceled));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_details_parses_runtime() {
        let transport = Arc::new(CannedTransport::new(
            200,
            r#"{"Title":"Inception","Runtime":"148 min","imdbRating":"8.8","imdbVotes":"2,500,000","imdbID":"tt1375666","Response":"True"}"#,
        ));

        let detail = client(transport.clone()).details("tt1375666", &CancellationToken::new()).await.unwrap();

        assert_eq!(detail.runtime_minutes, 148);
        assert_eq!(detail.imdb_rating, Some(8.8));
        assert_eq!(
            transport.urls.lock().unwrap()[0],
            "https://omdb.test/?apikey=secret&i=tt1375666"
        );
    }
}
