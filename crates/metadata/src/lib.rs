pub mod provider;
pub mod record;
pub mod resolve;
pub mod tmdb;

use seedfin_core::types::MediaKind;
use thiserror::Error;

pub use record::{EpisodeRecord, MediaRecord, SeasonRecord};
pub use resolve::Resolver;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("no {kind} results")]
    NoResults { kind: MediaKind },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Every lookup branch failed; carries the error of the last one attempted.
    #[error("{source}")]
    Unresolved {
        query: String,
        #[source]
        source: Box<MetadataError>,
    },
}
