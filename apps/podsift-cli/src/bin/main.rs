use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use podsift_core::catalog::EpisodeCatalog;
use podsift_core::config::{resolve_with_base, Config, SearchDefaults};
use podsift_core::types::{FeedId, ScoredResult, SearchRequest};
use podsift_text::{highlight, EpisodeSearchEngine};

/// Search and browse podcast episodes from a directory of feed exports.
#[derive(Parser)]
#[command(name = "podsift", version)]
struct Cli {
    /// Directory of `*.json` feed exports (defaults to `data.catalog_dir`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank episodes by weighted title/description matches
    Search {
        query: String,
        #[command(flatten)]
        scope: Scope,
        #[arg(long, allow_negative_numbers = true)]
        title_weight: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        description_weight: Option<i64>,
        /// Max matches per field counted toward the score
        #[arg(long, allow_negative_numbers = true)]
        cap: Option<i64>,
    },
    /// List the most recent episodes
    Browse {
        #[command(flatten)]
        scope: Scope,
    },
    /// Show feed and episode counts, per feed and in total
    Stats,
}

#[derive(Args)]
struct Scope {
    /// Restrict to these feed ids (repeatable); all feeds when omitted
    #[arg(long = "feed")]
    feeds: Vec<FeedId>,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    skip: i64,
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,
}

impl Scope {
    fn feed_ids(&self, catalog: &EpisodeCatalog) -> Vec<FeedId> {
        if self.feeds.is_empty() { catalog.feed_ids() } else { self.feeds.clone() }
    }
}

fn catalog_dir(cli: &Cli, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &cli.catalog { return Ok(dir.clone()); }
    let dir: String = config.get_or("data.catalog_dir", "data/feeds".to_string())?;
    Ok(resolve_with_base(Path::new("."), dir))
}

fn print_results(results: &[ScoredResult], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }
    if results.is_empty() { println!("No episodes found."); }
    for (i, r) in results.iter().enumerate() {
        let score = r.score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string());
        let (title, description) = match &r.matches {
            Some(m) => (highlight(&r.episode.title, &m.title, "[", "]"), highlight(&r.episode.description, &m.description, "[", "]")),
            None => (r.episode.title.clone(), r.episode.description.clone()),
        };
        println!("{:>3}. score={} date={} feed={} id={}\n     {}\n     {}",
            i + 1, score, r.episode.publish_date.format("%Y-%m-%d"), r.episode.feed_id, r.episode.id, title, description);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let defaults = SearchDefaults::from_config(&config)?;
    let dir = catalog_dir(&cli, &config)?;
    let catalog = EpisodeCatalog::load_dir(&dir)?;

    match &cli.command {
        Command::Search { query, scope, title_weight, description_weight, cap } => {
            let request = SearchRequest::new(query.clone(), scope.feed_ids(&catalog))
                .with_weights(title_weight.unwrap_or(defaults.title_weight), description_weight.unwrap_or(defaults.description_weight))
                .with_cap(cap.unwrap_or(defaults.cap_n_matches))
                .with_page(scope.skip, scope.limit.unwrap_or(defaults.limit));
            info!(query = %request.query, feeds = request.feed_ids.len(), "searching");
            let engine = EpisodeSearchEngine::new(&catalog);
            print_results(&engine.search(&request)?, cli.json)?;
        }
        Command::Browse { scope } => {
            let engine = EpisodeSearchEngine::new(&catalog);
            let results = engine.browse(&scope.feed_ids(&catalog), scope.skip, scope.limit.unwrap_or(defaults.limit))?;
            print_results(&results, cli.json)?;
        }
        Command::Stats => {
            let stats = catalog.stats();
            let feeds = catalog.feed_summaries();
            if cli.json {
                let out = serde_json::json!({ "feeds": stats.feeds, "episodes": stats.episodes, "per_feed": feeds });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Catalog: {}\nfeeds:    {}\nepisodes: {}", dir.display(), stats.feeds, stats.episodes);
                for feed in &feeds {
                    println!("  {:>6}  {:>5} episodes  {}", feed.id, feed.episodes, feed.title);
                }
            }
        }
    }
    Ok(())
}
