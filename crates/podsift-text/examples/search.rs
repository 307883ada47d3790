use std::env;
use std::path::{Path, PathBuf};

use podsift_core::catalog::EpisodeCatalog;
use podsift_core::types::SearchRequest;
use podsift_text::{highlight, EpisodeSearchEngine};

// Search a directory of feed exports and print highlighted results.
// Usage:
//   cargo run -p podsift-text --example search -- "your query" \
//     [--catalog ../../data/feeds] [--limit 10] [--title-weight 70 --description-weight 30]

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut query = String::new();
    let mut catalog_dir: Option<PathBuf> = None;
    let mut limit: i64 = 10;
    let mut title_weight: i64 = 50;
    let mut description_weight: i64 = 50;

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--catalog", Some(v)) => { catalog_dir = Some(PathBuf::from(v)); i += 2; }
            ("--limit", Some(v)) => { limit = v.parse().unwrap_or(limit); i += 2; }
            ("--title-weight", Some(v)) => { title_weight = v.parse().unwrap_or(title_weight); i += 2; }
            ("--description-weight", Some(v)) => { description_weight = v.parse().unwrap_or(description_weight); i += 2; }
            (s, _) if s.starts_with("--") => { eprintln!("Unknown or incomplete flag: {}", s); std::process::exit(2); }
            (s, _) => { if query.is_empty() { query = s.to_string(); } i += 1; }
        }
    }

    // Workspace-relative sample data unless --catalog is given
    let catalog_dir = catalog_dir.unwrap_or_else(|| {
        Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new(".")).join("data/feeds")
    });

    let catalog = EpisodeCatalog::load_dir(&catalog_dir)?;
    let request = SearchRequest::new(query.clone(), catalog.feed_ids())
        .with_weights(title_weight, description_weight)
        .with_page(0, limit);

    println!("Episode search\n==============");
    println!("Catalog: {}", catalog_dir.display());
    println!("Query: {:?} (limit {})\n", query, limit);

    let engine = EpisodeSearchEngine::new(catalog);
    for (i, r) in engine.search(&request)?.iter().enumerate() {
        let (title, description) = match &r.matches {
            Some(m) => (highlight(&r.episode.title, &m.title, "**", "**"), highlight(&r.episode.description, &m.description, "**", "**")),
            None => (r.episode.title.clone(), r.episode.description.clone()),
        };
        println!("{:>2}. score={:?} {}\n    {}", i + 1, r.score, title, description);
    }
    Ok(())
}
