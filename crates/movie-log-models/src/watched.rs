use serde::{Deserialize, Deserializer, Serialize};
use crate::movie_detail::MovieDetail;

/// A title the user has watched and rated.
///
/// The JSON layout is the persisted format of the watched list, so the
/// field names stay as they were first written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Poster", with = "crate::poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f64>,
    /// 0 when unknown; older lists stored NaN here, which JSON encodes as null
    #[serde(rename = "runtime", deserialize_with = "null_as_zero")]
    pub runtime_minutes: u32,
    #[serde(rename = "userRating")]
    pub user_rating: u8, // 1-10
    #[serde(rename = "countRatingDecisions", default)]
    pub rating_decisions: u32,
}

impl WatchedEntry {
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, rating_decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.imdb_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating,
            rating_decisions,
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Aggregate figures over the watched list, already rounded for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64, // 1 decimal
    pub avg_user_rating: f64, // 1 decimal
    pub avg_runtime: f64,     // whole minutes
}
