//! Search → details → rate → persist, wired through the real OMDb client
//! over a scripted transport.

use crate::{FileStore, MemoryStore, QueryController, RatingSession, SearchState, WatchedList};
use async_trait::async_trait;
use movie_log_sources::{HttpResponse, HttpTransport, OmdbClient, SourceError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Answers by matching a substring of the requested URL
struct RoutedTransport {
    routes: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl HttpTransport for RoutedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
        self.routes
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, body)| HttpResponse {
                status: 200,
                body: body.to_string(),
            })
            .ok_or_else(|| SourceError::Network(format!("no route for {}", url)))
    }
}

const SEARCH_BODY: &str = r#"{"Search":[
    {"Title":"The Matrix Revisited","Year":"2001","imdbID":"tt0295432","Type":"movie","Poster":"N/A"},
    {"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Type":"movie","Poster":"https://img.test/matrix.jpg"}
],"totalResults":"2","Response":"True"}"#;

const DETAIL_BODY: &str = r#"{"Title":"The Matrix","Year":"1999","Released":"31 Mar 1999","Runtime":"136 min",
"Genre":"Action, Sci-Fi","Director":"Lana Wachowski, Lilly Wachowski","Actors":"Keanu Reeves, Laurence Fishburne",
"Plot":"A hacker learns the truth.","Poster":"https://img.test/matrix.jpg","imdbRating":"8.7","imdbVotes":"2,100,000",
"imdbID":"tt0133093","Type":"movie","Response":"True"}"#;

fn omdb() -> Arc<OmdbClient> {
    let transport = RoutedTransport {
        routes: vec![("s=matrix", SEARCH_BODY), ("i=tt0133093", DETAIL_BODY)],
    };
    Arc::new(OmdbClient::new(Arc::new(transport), "https://omdb.test/", "key"))
}

#[tokio::test]
async fn test_search_rate_and_persist() {
    let client = omdb();
    let mut controller = QueryController::new(client.clone(), 3);

    controller.set_query("matrix");
    let state = controller.settled().await;
    assert!(matches!(state, SearchState::Success { .. }));
    assert_eq!(state.movies().len(), 2);

    let picked = &state.movies()[1];
    let detail = client.details(&picked.imdb_id, &CancellationToken::new()).await.unwrap();
    assert_eq!(detail.runtime_minutes, 136);

    let mut session = RatingSession::new();
    session.set_rating(7).unwrap();
    session.set_rating(9).unwrap();
    let entry = session.commit(&detail).unwrap();

    let store = Arc::new(MemoryStore::new());
    let mut watched = WatchedList::load(store.clone(), "watched").unwrap();
    watched.add(entry).unwrap();

    let saved = watched.get("tt0133093").unwrap();
    assert_eq!(saved.runtime_minutes, 136);
    assert_eq!(saved.user_rating, 9);
    assert_eq!(saved.rating_decisions, 2);

    let reloaded = WatchedList::load(store, "watched").unwrap();
    assert_eq!(reloaded.entries(), watched.entries());

    let summary = reloaded.summary();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.avg_user_rating, 9.0);
    assert_eq!(summary.avg_runtime, 136.0);
}

#[tokio::test]
async fn test_watched_list_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let client = omdb();
    let detail = client.details("tt0133093", &CancellationToken::new()).await.unwrap();

    let mut session = RatingSession::new();
    session.set_rating(8).unwrap();

    {
        let mut watched = WatchedList::load(FileStore::new(dir.path()), "watched").unwrap();
        watched.add(session.commit(&detail).unwrap()).unwrap();
    }

    let watched = WatchedList::load(FileStore::new(dir.path()), "watched").unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched.entries()[0].title, "The Matrix");
    assert_eq!(watched.entries()[0].imdb_rating, Some(8.7));
}

#[tokio::test]
async fn test_unknown_query_surfaces_source_error() {
    let mut controller = QueryController::new(omdb(), 3);

    controller.set_query("alien");
    let state = controller.settled().await;

    let message = state.error().unwrap();
    assert!(message.starts_with("network error: no route"), "{}", message);
    assert!(state.movies().is_empty());
}
