pub mod error;
pub mod omdb;
pub mod traits;
pub mod transport;

pub use error::SourceError;
pub use omdb::OmdbClient;
pub use traits::MovieSource;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
