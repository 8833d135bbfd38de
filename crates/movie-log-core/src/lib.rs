pub mod file_store;
pub mod query;
pub mod rating;
pub mod store;
pub mod summary;
pub mod watched;

pub use file_store::FileStore;
pub use query::{QueryController, SearchState};
pub use rating::{RatingError, RatingSession, MAX_RATING, MIN_RATING};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use summary::{average, round_to, summarize};
pub use watched::WatchedList;

#[cfg(test)]
mod tests;
