pub mod media;
pub mod movie_detail;
pub mod poster;
pub mod search_result;
pub mod watched;

pub use media::MediaType;
pub use movie_detail::MovieDetail;
pub use search_result::SearchResult;
pub use watched::{WatchedEntry, WatchedSummary};
