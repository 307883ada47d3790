//! Domain types shared by the catalog, the search engine and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type FeedId = i64;
pub type EpisodeId = i64;

pub const DEFAULT_TITLE_WEIGHT: i64 = 50;
pub const DEFAULT_DESCRIPTION_WEIGHT: i64 = 50;
pub const DEFAULT_CAP_N_MATCHES: i64 = 10;
pub const DEFAULT_LIMIT: i64 = 100;

/// A single podcast episode.
///
/// - `id`: opaque identifier, unique within a catalog
/// - `feed_id`: the feed that owns the episode (filled in from the enclosing
///   feed when a feed export is loaded)
/// - `title`/`description`: the two searchable text fields
/// - `publish_date`: used for recency ordering and score tie-breaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    #[serde(default)]
    pub feed_id: FeedId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub publish_date: DateTime<Utc>,
}

/// A podcast feed together with its episodes. One JSON file per feed is the
/// on-disk export unit read by [`crate::catalog::EpisodeCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: FeedId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rss_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Half-open `[start, end)` range of character offsets into a field.
///
/// Offsets count chars, not bytes. Serialized as a two element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for MatchSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<MatchSpan> for (usize, usize) {
    fn from(span: MatchSpan) -> Self {
        (span.start, span.end)
    }
}

/// Every match found in each searchable field. Never truncated by the cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatches {
    pub title: Vec<MatchSpan>,
    pub description: Vec<MatchSpan>,
}

/// One row of a search page.
///
/// `score` and `matches` are both `None` in browse mode (empty query).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub episode: Episode,
    pub score: Option<f64>,
    pub matches: Option<FieldMatches>,
}

/// Parameters of one search call, scoped to a set of feeds.
///
/// Missing fields deserialize to the same defaults as [`SearchRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(alias = "podcast_ids")]
    pub feed_ids: Vec<FeedId>,
    #[serde(default = "default_title_weight")]
    pub title_weight: i64,
    #[serde(default = "default_description_weight")]
    pub description_weight: i64,
    #[serde(default = "default_cap_n_matches")]
    pub cap_n_matches: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, feed_ids: Vec<FeedId>) -> Self {
        Self {
            query: query.into(),
            feed_ids,
            title_weight: DEFAULT_TITLE_WEIGHT,
            description_weight: DEFAULT_DESCRIPTION_WEIGHT,
            cap_n_matches: DEFAULT_CAP_N_MATCHES,
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_weights(mut self, title_weight: i64, description_weight: i64) -> Self {
        self.title_weight = title_weight;
        self.description_weight = description_weight;
        self
    }

    pub fn with_cap(mut self, cap_n_matches: i64) -> Self {
        self.cap_n_matches = cap_n_matches;
        self
    }

    pub fn with_page(mut self, skip: i64, limit: i64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }
}

fn default_title_weight() -> i64 { DEFAULT_TITLE_WEIGHT }
fn default_description_weight() -> i64 { DEFAULT_DESCRIPTION_WEIGHT }
fn default_cap_n_matches() -> i64 { DEFAULT_CAP_N_MATCHES }
fn default_limit() -> i64 { DEFAULT_LIMIT }
