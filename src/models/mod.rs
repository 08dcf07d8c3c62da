pub mod movie;
pub mod search;

pub use movie::Movie;
pub use search::{MovieQuery, QueryFrequency, SearchLogEntry, SearchQuery};
