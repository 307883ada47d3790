#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::{CatalogStats, EpisodeCatalog, FeedSummary};
pub use error::{Error, Result};
pub use traits::EpisodeSource;
pub use types::{Episode, EpisodeId, FeedId, Feed, FieldMatches, MatchSpan, ScoredResult, SearchRequest};
