use crate::error::Result;
use crate::types::{Episode, FeedId};

/// Supplier of candidate episodes for a search call.
///
/// Implementations return every episode owned by one of `feed_ids`, in a
/// stable order. Unknown feed ids contribute nothing.
pub trait EpisodeSource: Send + Sync {
    fn episodes_for_feeds(&self, feed_ids: &[FeedId]) -> Result<Vec<Episode>>;
}

impl<T: EpisodeSource + ?Sized> EpisodeSource for &T {
    fn episodes_for_feeds(&self, feed_ids: &[FeedId]) -> Result<Vec<Episode>> {
        (**self).episodes_for_feeds(feed_ids)
    }
}
