//! Scoring, ordering and pagination of candidate episodes.
//!
//! Two modes, picked by whether the query is blank:
//! - browse: newest first, unscored, nothing filtered out
//! - scoring: weighted capped match counts, zero scores dropped, ordered by
//!   `(score desc, publish_date desc)`
//!
//! Both sorts are stable, so exact ties keep the candidate order.

use podsift_core::types::{
    Episode, FieldMatches, ScoredResult, SearchRequest, DEFAULT_CAP_N_MATCHES,
    DEFAULT_DESCRIPTION_WEIGHT, DEFAULT_LIMIT, DEFAULT_TITLE_WEIGHT,
};

use crate::matcher::QueryMatcher;
use crate::weights::normalize_weights;

/// Everything besides the query and candidates that shapes a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub title_weight: i64,
    pub description_weight: i64,
    /// Max matches per field that count toward the score.
    pub cap: i64,
    pub skip: i64,
    pub limit: i64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            title_weight: DEFAULT_TITLE_WEIGHT,
            description_weight: DEFAULT_DESCRIPTION_WEIGHT,
            cap: DEFAULT_CAP_N_MATCHES,
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&SearchRequest> for SearchParams {
    fn from(req: &SearchRequest) -> Self {
        Self {
            title_weight: req.title_weight,
            description_weight: req.description_weight,
            cap: req.cap_n_matches,
            skip: req.skip,
            limit: req.limit,
        }
    }
}

/// Rank `episodes` against `query` and return the requested page.
pub fn search(episodes: &[Episode], query: &str, params: &SearchParams) -> Vec<ScoredResult> {
    if query.trim().is_empty() {
        return browse(episodes, params.skip, params.limit);
    }

    let weights = normalize_weights(params.title_weight, params.description_weight);
    let matcher = QueryMatcher::new(query);
    let cap = clamp_count(params.cap);

    let mut scored: Vec<(&Episode, f64, FieldMatches)> = episodes
        .iter()
        .filter_map(|episode| {
            let matches = FieldMatches {
                title: matcher.find_in(&episode.title),
                description: matcher.find_in(&episode.description),
            };
            let score = weights.score(
                matches.title.len().min(cap),
                matches.description.len().min(cap),
            );
            (score > 0.0).then_some((episode, score, matches))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| b.0.publish_date.cmp(&a.0.publish_date))
    });

    paginate(scored, params.skip, params.limit)
        .into_iter()
        .map(|(episode, score, matches)| ScoredResult {
            episode: episode.clone(),
            score: Some(score),
            matches: Some(matches),
        })
        .collect()
}

/// Most recent episodes first, unscored.
pub fn browse(episodes: &[Episode], skip: i64, limit: i64) -> Vec<ScoredResult> {
    let mut ordered: Vec<&Episode> = episodes.iter().collect();
    ordered.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));

    paginate(ordered, skip, limit)
        .into_iter()
        .map(|episode| ScoredResult { episode: episode.clone(), score: None, matches: None })
        .collect()
}

/// Offset-and-count slice. Negative `skip` reads as 0; `limit <= 0` gives an
/// empty page.
pub fn paginate<T>(items: Vec<T>, skip: i64, limit: i64) -> Vec<T> {
    items.into_iter().skip(clamp_count(skip)).take(clamp_count(limit)).collect()
}

fn clamp_count(n: i64) -> usize {
    if n <= 0 {
        0
    } else {
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ep(id: i64, title: &str, description: &str, day: u32) -> Episode {
        Episode {
            id,
            feed_id: 1,
            title: title.to_string(),
            description: description.to_string(),
            url: String::new(),
            image_url: None,
            publish_date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn ids(results: &[ScoredResult]) -> Vec<i64> {
        results.iter().map(|r| r.episode.id).collect()
    }

    #[test]
    fn paginate_edges() {
        let v: Vec<u8> = (0..4).collect();
        assert_eq!(paginate(v.clone(), 1, 2), vec![1, 2]);
        assert_eq!(paginate(v.clone(), 5, 3), Vec::<u8>::new());
        assert_eq!(paginate(v.clone(), 0, 0), Vec::<u8>::new());
        assert_eq!(paginate(v.clone(), 0, -1), Vec::<u8>::new());
        assert_eq!(paginate(v.clone(), -3, 2), vec![0, 1]);
        assert_eq!(paginate(v, i64::MAX, i64::MAX), Vec::<u8>::new());
    }

    #[test]
    fn equal_scores_break_ties_by_newest() {
        let episodes = vec![ep(1, "rust", "", 1), ep(2, "rust", "", 9), ep(3, "rust", "", 5)];
        let results = search(&episodes, "rust", &SearchParams::default());
        assert_eq!(ids(&results), vec![2, 3, 1]);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let episodes = vec![ep(7, "rust", "", 3), ep(4, "rust", "", 3), ep(9, "rust", "", 3)];
        let results = search(&episodes, "rust", &SearchParams::default());
        assert_eq!(ids(&results), vec![7, 4, 9]);

        let browsed = browse(&episodes, 0, 10);
        assert_eq!(ids(&browsed), vec![7, 4, 9]);
    }

    #[test]
    fn blank_query_browses() {
        let episodes = vec![ep(1, "a", "", 1), ep(2, "b", "", 2)];
        let results = search(&episodes, "   ", &SearchParams::default());
        assert_eq!(ids(&results), vec![2, 1]);
        assert!(results.iter().all(|r| r.score.is_none() && r.matches.is_none()));
    }

    #[test]
    fn query_whitespace_is_matched_literally() {
        let episodes = vec![ep(1, "go fast", "", 1), ep(2, "gofast", "", 2)];
        let results = search(&episodes, "go ", &SearchParams::default());
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn negative_weight_can_drop_matching_episodes() {
        let episodes = vec![ep(1, "ai", "", 1), ep(2, "", "ai", 2)];
        let params = SearchParams {
            title_weight: -10,
            description_weight: 20,
            ..SearchParams::default()
        };
        let results = search(&episodes, "ai", &params);
        assert_eq!(ids(&results), vec![2]);
        assert_eq!(results[0].score, Some(200.0));
    }
}
