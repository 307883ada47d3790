//! podsift-text
//!
//! Literal substring search over episode titles and descriptions: weight
//! normalization, match spans, ranking with pagination, and highlighting.

pub mod engine;
pub mod highlight;
pub mod matcher;
pub mod ranking;
pub mod weights;

pub use engine::EpisodeSearchEngine;
pub use highlight::highlight;
pub use matcher::{find_matches, QueryMatcher};
pub use ranking::{browse, paginate, search, SearchParams};
pub use weights::{normalize_weights, Weights};
