use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// One row of an OMDb search response. Field names follow the API payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String, // Free text: series come back as "2008–2013"
    #[serde(rename = "Type", default)]
    pub media_type: MediaType,
    #[serde(rename = "Poster", with = "crate::poster", default)]
    pub poster: Option<String>,
}
