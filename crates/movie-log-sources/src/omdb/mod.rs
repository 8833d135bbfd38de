pub mod api;
pub mod client;
pub mod parser;

pub use client::OmdbClient;
pub use parser::parse_runtime;
