use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full record for a single title, already normalised from the API's
/// string-typed payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub poster: Option<String>,
    pub runtime_minutes: u32,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<u64>,
    pub plot: String,
    pub released: String,
    pub actors: Vec<String>,
    pub director: String,
    pub genres: Vec<String>,
}

impl MovieDetail {
    /// Release date, when OMDb supplied one in its usual `31 Mar 1999` form.
    pub fn release_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.released.trim(), "%d %b %Y").ok()
    }
}
