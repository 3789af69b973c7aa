//! Command-line interface definitions for Vorarlberg Digest.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Sources normally come from the config file; `--articles` adds
/// already-normalized article lists on top of them.
///
/// # Examples
///
/// ```sh
/// # Use the sources listed in config.yaml
/// vorarlberg_digest -c config.yaml -o ./data
///
/// # Digest a normalized article dump with default settings
/// vorarlberg_digest -a ./dumps/articles.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "DIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory for the digest and the article list
    #[arg(short, long, env = "DIGEST_OUTPUT_DIR", default_value = "data")]
    pub output_dir: String,

    /// Normalized article list (JSON array); may be repeated
    #[arg(short, long = "articles")]
    pub articles: Vec<PathBuf>,

    /// Override the number of newest relevant articles kept per run
    #[arg(long)]
    pub max_articles: Option<usize>,
}
