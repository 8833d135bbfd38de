use movie_log_models::{MovieDetail, SearchResult};
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::SourceError;
use crate::omdb::parser;
use crate::transport::HttpResponse;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchResult>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Poster", with = "movie_log_models::poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

/// `Response` is the string "True" or "False"
fn is_failure(response: &str) -> bool {
    response.trim().eq_ignore_ascii_case("false")
}

fn with_params(base_url: &str, params: &[(&str, &str)]) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{}{}", base_url, separator, query)
}

pub fn search_url(base_url: &str, api_key: &str, query: &str) -> String {
    with_params(base_url, &[("apikey", api_key), ("s", query)])
}

pub fn detail_url(base_url: &str, api_key: &str, imdb_id: &str) -> String {
    with_params(base_url, &[("apikey", api_key), ("i", imdb_id)])
}

fn check_status(response: &HttpResponse) -> Result<(), SourceError> {
    if response.is_success() {
        Ok(())
    } else {
        warn!(status = response.status, "OMDb returned a non-success status");
        Err(SourceError::Network(format!(
            "network response was not ok (HTTP {})",
            response.status
        )))
    }
}

/// Map a search reply to results, or to the API's own failure message
pub fn decode_search(response: &HttpResponse) -> Result<Vec<SearchResult>, SourceError> {
    check_status(response)?;

    let payload: SearchResponse = serde_json::from_str(&response.body)
        .map_err(|e| SourceError::Parse(format!("invalid search response: {}", e)))?;

    if is_failure(&payload.response) {
        let message = payload.error.unwrap_or_else(|| "Movie not found!".to_string());
        debug!(message = %message, "OMDb search reported failure");
        return Err(SourceError::NotFound(message));
    }

    debug!(
        results = payload.search.len(),
        total = payload.total_results.as_deref().unwrap_or("?"),
        "OMDb search succeeded"
    );
    Ok(payload.search)
}

/// Map a detail reply to a `MovieDetail`; fails on an unparseable runtime
pub fn decode_detail(response: &HttpResponse, requested_id: &str) -> Result<MovieDetail, SourceError> {
    check_status(response)?;

    let payload: DetailResponse = serde_json::from_str(&response.body)
        .map_err(|e| SourceError::Parse(format!("invalid detail response: {}", e)))?;

    if is_failure(&payload.response) {
        let message = payload.error.unwrap_or_else(|| "Incorrect IMDb ID.".to_string());
        return Err(SourceError::NotFound(message));
    }

    let runtime_minutes = parser::parse_runtime(&payload.runtime)?;

    Ok(MovieDetail {
        imdb_id: payload.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        title: payload.title,
        poster: payload.poster,
        runtime_minutes,
        imdb_rating: parser::parse_rating(&payload.imdb_rating),
        imdb_votes: parser::parse_votes(&payload.imdb_votes),
        plot: payload.plot,
        released: payload.released,
        actors: parser::split_list(&payload.actors),
        director: payload.director,
        genres: parser::split_list(&payload.genre),
    })
}
