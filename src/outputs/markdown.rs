//! Markdown output of the compiled digest.

use chrono::NaiveDate;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write `digest` to `{output_dir}/digest_{date}.md` and return the path.
#[instrument(level = "info", skip_all, fields(%output_dir, %date))]
pub async fn write_digest(digest: &str, output_dir: &str, date: NaiveDate) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;
    let path = format!("{}/digest_{}.md", output_dir.trim_end_matches('/'), date);
    fs::write(&path, digest).await?;
    info!(path = %path, bytes = digest.len(), "Saved digest");
    Ok(path)
}
