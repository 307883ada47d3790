use std::fs;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use podsift_core::catalog::EpisodeCatalog;
use podsift_core::error::Error;
use podsift_core::traits::EpisodeSource;
use podsift_core::types::{Episode, Feed, MatchSpan, SearchRequest};

fn feed_json(id: i64, title: &str, episodes: &[(i64, &str, &str)]) -> String {
    let episodes: Vec<serde_json::Value> = episodes
        .iter()
        .map(|(eid, t, date)| {
            serde_json::json!({
                "id": eid,
                "title": t,
                "description": format!("about {}", t),
                "url": format!("https://example.com/{}", eid),
                "publish_date": date,
            })
        })
        .collect();
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "a feed",
        "rss_url": "https://example.com/rss",
        "episodes": episodes,
    })
    .to_string()
}

fn episode(id: i64, feed_id: i64) -> Episode {
    Episode {
        id,
        feed_id,
        title: format!("episode {}", id),
        description: String::new(),
        url: String::new(),
        image_url: None,
        publish_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn feed(id: i64, episode_ids: &[i64]) -> Feed {
    Feed {
        id,
        title: format!("feed {}", id),
        description: String::new(),
        rss_url: String::new(),
        image_url: None,
        homepage_url: None,
        episodes: episode_ids.iter().map(|&e| episode(e, 0)).collect(),
    }
}

#[test]
fn load_dir_reads_nested_feed_exports_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("b.json"), feed_json(2, "Second", &[(20, "Cooking Tips", "2024-02-01T00:00:00Z")])).unwrap();
    fs::write(dir.join("a.json"), feed_json(1, "First", &[(10, "The Future of AI", "2024-01-01T00:00:00Z")])).unwrap();
    fs::write(dir.join("nested/c.json"), feed_json(3, "Third", &[])).unwrap();
    fs::write(dir.join("notes.txt"), "not a feed").unwrap();

    let catalog = EpisodeCatalog::load_dir(dir).expect("load catalog");

    assert_eq!(catalog.feed_ids(), vec![1, 2, 3], "files are loaded in sorted path order");
    let stats = catalog.stats();
    assert_eq!(stats.feeds, 3);
    assert_eq!(stats.episodes, 2);
    let counts: Vec<(i64, usize)> = catalog.feed_summaries().iter().map(|s| (s.id, s.episodes)).collect();
    assert_eq!(counts, vec![(1, 1), (2, 1), (3, 0)]);
    assert_eq!(catalog.feed_summaries()[0].title, "First");
    let ai = &catalog.feed(1).unwrap().episodes[0];
    assert_eq!(ai.feed_id, 1, "episodes inherit the enclosing feed id");
    assert_eq!(ai.publish_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn load_dir_reports_the_malformed_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

    let err = EpisodeCatalog::load_dir(tmp.path()).unwrap_err();
    match err {
        Error::Parse { path, .. } => assert!(path.ends_with("broken.json")),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn load_dir_missing_directory_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = EpisodeCatalog::load_dir(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn episodes_for_feeds_scopes_to_requested_feeds() {
    let catalog = EpisodeCatalog::from_feeds(vec![feed(1, &[10, 11]), feed(2, &[20]), feed(3, &[30])]);

    let ids: Vec<i64> = catalog.episodes_for_feeds(&[3, 1]).unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![10, 11, 30], "catalog order, not request order");

    assert!(catalog.episodes_for_feeds(&[99]).unwrap().is_empty());
    assert!(catalog.episodes_for_feeds(&[]).unwrap().is_empty());
}

#[test]
fn insert_feed_replaces_in_place() {
    let mut catalog = EpisodeCatalog::from_feeds(vec![feed(1, &[10]), feed(2, &[20])]);
    let old = catalog.insert_feed(feed(1, &[12, 13]));

    assert_eq!(old.map(|f| f.episodes.len()), Some(1));
    assert_eq!(catalog.feed_ids(), vec![1, 2]);
    assert_eq!(catalog.stats().episodes, 3);
}

#[test]
fn remove_feed_drops_its_episodes() {
    let mut catalog = EpisodeCatalog::from_feeds(vec![feed(1, &[10, 11]), feed(2, &[20])]);

    assert!(catalog.remove_feed(1).is_some());
    assert!(catalog.remove_feed(1).is_none());
    assert_eq!(catalog.stats().feeds, 1);
    assert_eq!(catalog.stats().episodes, 1);
    assert!(catalog.episodes_for_feeds(&[1]).unwrap().is_empty());
}

#[test]
fn clear_episodes_keeps_feeds() {
    let mut catalog = EpisodeCatalog::from_feeds(vec![feed(1, &[10, 11]), feed(2, &[20])]);

    assert_eq!(catalog.clear_episodes(&[1, 7]), 2);
    assert_eq!(catalog.stats().feeds, 2);
    assert_eq!(catalog.stats().episodes, 1);
}

#[test]
fn search_request_fills_defaults() {
    let req: SearchRequest = serde_json::from_str(r#"{"podcast_ids": [1, 2]}"#).unwrap();

    assert_eq!(req, SearchRequest::new("", vec![1, 2]));
    assert_eq!((req.title_weight, req.description_weight, req.cap_n_matches, req.skip, req.limit), (50, 50, 10, 0, 100));
}

#[test]
fn match_span_serializes_as_pair() {
    let json = serde_json::to_string(&vec![MatchSpan::new(0, 2), MatchSpan::new(5, 7)]).unwrap();
    assert_eq!(json, "[[0,2],[5,7]]");
    let back: Vec<MatchSpan> = serde_json::from_str(&json).unwrap();
    assert_eq!(back[1], MatchSpan::new(5, 7));
}
