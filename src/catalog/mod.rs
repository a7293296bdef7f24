mod client;
mod error;
mod timeout;
pub mod types;
mod utils;

pub use client::{Catalog, OmdbClient};
pub use error::{CatalogError, TRANSPORT_MESSAGE};
pub use timeout::TimedCatalog;
pub use types::{
    DetailResponse, MovieDetails, MovieSummary, SearchPage, SearchResponse, SourceRating,
};
pub use utils::{NOT_AVAILABLE, is_not_available};
