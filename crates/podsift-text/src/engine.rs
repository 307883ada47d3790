use podsift_core::error::Result;
use podsift_core::traits::EpisodeSource;
use podsift_core::types::{FeedId, ScoredResult, SearchRequest};
use tracing::debug;

use crate::ranking::{self, SearchParams};

/// Runs searches against candidates fetched from an [`EpisodeSource`].
pub struct EpisodeSearchEngine<S>
where
    S: EpisodeSource,
{
    source: S,
}

impl<S> EpisodeSearchEngine<S>
where
    S: EpisodeSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn search(&self, request: &SearchRequest) -> Result<Vec<ScoredResult>> {
        let candidates = self.source.episodes_for_feeds(&request.feed_ids)?;
        let results = ranking::search(&candidates, &request.query, &SearchParams::from(request));
        debug!(
            feeds = request.feed_ids.len(),
            candidates = candidates.len(),
            results = results.len(),
            browse = request.query.trim().is_empty(),
            "episode search"
        );
        Ok(results)
    }

    /// Newest episodes of `feed_ids`, unscored.
    pub fn browse(&self, feed_ids: &[FeedId], skip: i64, limit: i64) -> Result<Vec<ScoredResult>> {
        let candidates = self.source.episodes_for_feeds(feed_ids)?;
        let results = ranking::browse(&candidates, skip, limit);
        debug!(
            feeds = feed_ids.len(),
            candidates = candidates.len(),
            results = results.len(),
            "episode browse"
        );
        Ok(results)
    }
}
