//! JSON output of the article list.
//!
//! The articles are written exactly as the engine saw them after enrichment,
//! newest first, so a persistence job can pick them up without re-running
//! the filter.

use crate::models::Article;
use chrono::NaiveDate;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `articles` to `{output_dir}/articles_{date}.json` and return the path.
#[instrument(level = "info", skip_all, fields(%output_dir, %date))]
pub async fn write_articles(
    articles: &[Article],
    output_dir: &str,
    date: NaiveDate,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;

    info!(%output_dir, "Ensuring output directory exists");
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = format!("{}/articles_{}.json", output_dir.trim_end_matches('/'), date);
    fs::write(&path, json).await?;
    info!(path = %path, count = articles.len(), "Wrote article list");
    Ok(path)
}
