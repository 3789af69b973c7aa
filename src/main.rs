//! # Vorarlberg Digest
//!
//! A news relevance engine for an American retiree living in Vorarlberg,
//! Austria. It reads article batches collected from several providers,
//! scores each article for local relevance, sorts the survivors into interest
//! categories and compiles a deduplicated Markdown digest.
//!
//! ## Usage
//!
//! ```sh
//! vorarlberg_digest -c config.yaml -o ./data
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: read every configured source (4 at a time) into [`models::Article`]s
//! 2. **Scoring**: reject live blogs, foreign regions and stale news; score the rest
//! 3. **Categorizing**: assign each accepted article to one or more interest categories
//! 4. **Compiling**: render a digest that lists every article at most once
//! 5. **Output**: write `digest_{date}.md` and `articles_{date}.json`

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod categorize;
mod cli;
mod config;
mod dates;
mod digest;
mod enrich;
mod models;
mod outputs;
mod pipeline;
mod scoring;
mod sources;
mod taxonomy;
mod utils;

use cli::Cli;
use config::Config;
use outputs::{json, markdown};
use pipeline::Pipeline;
use sources::{PayloadSource, Source};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("vorarlberg_digest starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output_dir, articles = args.articles.len(), "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref()).await?;
    for path in &args.articles {
        config.sources.push(Source::Articles(PayloadSource {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "articles".to_string()),
            path: path.clone(),
        }));
    }
    if let Some(max_articles) = args.max_articles {
        config.batch.max_articles = max_articles;
    }

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    if config.sources.is_empty() {
        info!("No sources configured; the digest will be empty");
    }
    let articles = sources::load_all(&config.sources).await;
    info!(count = articles.len(), "Total articles to analyze");

    let now = Local::now().naive_local();
    let report = Pipeline::new(&config).run(articles, now);
    let today = now.date();

    if let Err(e) = json::write_articles(&report.articles, &args.output_dir, today).await {
        error!(error = %e, "Failed to write article list");
    }

    match markdown::write_digest(&report.digest, &args.output_dir, today).await {
        Ok(path) => info!(path = %path, "Wrote digest"),
        Err(e) => {
            error!(output_dir = %args.output_dir, error = %e, "Failed writing digest");
            return Err(e);
        }
    }

    for (category, count) in &report.counts {
        info!(category = %category, count, "Category summary");
    }

    let elapsed = start_time.elapsed();
    info!(
        elapsed_secs = elapsed.as_secs_f64(),
        relevant = report.articles.len(),
        "Execution complete"
    );

    Ok(())
}
