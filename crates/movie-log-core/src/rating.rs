use movie_log_models::{MovieDetail, WatchedEntry};
use thiserror::Error;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating {0} is outside 1-10")]
    OutOfRange(u8),
}

/// The user's pending rating for one title.
///
/// Counts how often the chosen value changed before it was committed; the
/// count is stored with the entry as `countRatingDecisions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingSession {
    rating: Option<u8>,
    decisions: u32,
}

impl RatingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), RatingError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(RatingError::OutOfRange(rating));
        }
        if self.rating != Some(rating) {
            self.rating = Some(rating);
            self.decisions += 1;
        }
        Ok(())
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn decisions(&self) -> u32 {
        self.decisions
    }

    /// Entry to hand to the watched list; `None` until a rating was chosen
    pub fn commit(&self, detail: &MovieDetail) -> Option<WatchedEntry> {
        self.rating
            .map(|rating| WatchedEntry::from_detail(detail, rating, self.decisions))
    }
}
