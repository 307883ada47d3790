//! In-memory episode catalog loaded from JSON feed exports.
//!
//! Each `*.json` file under the catalog directory holds one [`Feed`] with its
//! episodes. Files are read in sorted path order so that episode order, and
//! therefore tie order in search results, is stable between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::traits::EpisodeSource;
use crate::types::{Episode, Feed, FeedId};

/// Row counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub feeds: usize,
    pub episodes: usize,
}

/// A feed with its episode count, without the episodes themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSummary {
    pub id: FeedId,
    pub title: String,
    pub episodes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EpisodeCatalog {
    feeds: Vec<Feed>,
}

impl EpisodeCatalog {
    pub fn new() -> Self { Self::default() }

    pub fn from_feeds<I: IntoIterator<Item = Feed>>(feeds: I) -> Self {
        let mut catalog = Self::new();
        for feed in feeds {
            catalog.insert_feed(feed);
        }
        catalog
    }

    /// Load every `*.json` feed export below `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::NotFound(format!("catalog directory {}", dir.display())));
        }
        let files = list_json_files(dir);
        let mut catalog = Self::new();
        for file_path in &files {
            catalog.load_file(file_path)?;
        }
        let stats = catalog.stats();
        info!(dir = %dir.display(), files = files.len(), feeds = stats.feeds, episodes = stats.episodes, "loaded episode catalog");
        Ok(catalog)
    }

    /// Parse one feed export and insert it, returning the feed id.
    pub fn load_file(&mut self, file_path: &Path) -> Result<FeedId> {
        let content = fs::read_to_string(file_path).map_err(|source| Error::Io { path: file_path.to_path_buf(), source })?;
        let feed: Feed = serde_json::from_str(&content).map_err(|source| Error::Parse { path: file_path.to_path_buf(), source })?;
        let id = feed.id;
        debug!(path = %file_path.display(), feed = id, episodes = feed.episodes.len(), "read feed export");
        if self.insert_feed(feed).is_some() {
            warn!(path = %file_path.display(), feed = id, "feed id seen twice, keeping the later export");
        }
        Ok(id)
    }

    /// Insert or replace a feed. Episodes are stamped with the feed's id.
    /// A replaced feed keeps its position and is returned.
    pub fn insert_feed(&mut self, mut feed: Feed) -> Option<Feed> {
        for episode in &mut feed.episodes {
            episode.feed_id = feed.id;
        }
        match self.feeds.iter_mut().find(|f| f.id == feed.id) {
            Some(slot) => Some(std::mem::replace(slot, feed)),
            None => {
                self.feeds.push(feed);
                None
            }
        }
    }

    pub fn feed(&self, id: FeedId) -> Option<&Feed> {
        self.feeds.iter().find(|f| f.id == id)
    }

    pub fn feeds(&self) -> &[Feed] { &self.feeds }

    pub fn feed_ids(&self) -> Vec<FeedId> {
        self.feeds.iter().map(|f| f.id).collect()
    }

    /// Delete a feed together with all of its episodes.
    pub fn remove_feed(&mut self, id: FeedId) -> Option<Feed> {
        let pos = self.feeds.iter().position(|f| f.id == id)?;
        Some(self.feeds.remove(pos))
    }

    /// Drop the episodes of the given feeds, keeping the feeds themselves.
    /// Returns how many episodes were removed.
    pub fn clear_episodes(&mut self, feed_ids: &[FeedId]) -> usize {
        let mut removed = 0;
        for feed in self.feeds.iter_mut().filter(|f| feed_ids.contains(&f.id)) {
            removed += feed.episodes.len();
            feed.episodes.clear();
        }
        removed
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            feeds: self.feeds.len(),
            episodes: self.feeds.iter().map(|f| f.episodes.len()).sum(),
        }
    }

    /// Every feed with its episode count, in catalog order.
    pub fn feed_summaries(&self) -> Vec<FeedSummary> {
        self.feeds
            .iter()
            .map(|f| FeedSummary { id: f.id, title: f.title.clone(), episodes: f.episodes.len() })
            .collect()
    }
}

impl EpisodeSource for EpisodeCatalog {
    fn episodes_for_feeds(&self, feed_ids: &[FeedId]) -> Result<Vec<Episode>> {
        Ok(self
            .feeds
            .iter()
            .filter(|f| feed_ids.contains(&f.id))
            .flat_map(|f| f.episodes.iter().cloned())
            .collect())
    }
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut json_files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
    }
    json_files.sort();
    json_files
}
