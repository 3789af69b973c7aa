//! Provider adapters that turn pre-fetched payloads into [`Article`]s.
//!
//! Fetching itself happens elsewhere; each adapter reads the payload a
//! provider returned (saved to disk by the fetch job) and translates the
//! provider's field names into the common [`Article`] shape.
//!
//! # Supported Providers
//!
//! | Kind | Module | Payload |
//! |------|--------|---------|
//! | `news_api` | [`newsapi`] | NewsAPI `top-headlines` / `everything` response |
//! | `guardian` | [`guardian`] | Guardian content API search response |
//! | `media_stack` | [`mediastack`] | MediaStack `/v1/news` response |
//! | `feed` | [`feed`] | Feed entries exported as JSON (Vorarlberg regional feeds) |
//! | `articles` | - | An already-normalized article list |
//!
//! The set is closed: adding a provider means adding a [`Source`] variant.

use crate::models::Article;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, instrument};

pub mod feed;
pub mod guardian;
pub mod mediastack;
pub mod newsapi;

/// Sources read at the same time.
const PARALLEL_SOURCES: usize = 4;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload is not the shape the provider is supposed to send.
    #[error("{path} is not a valid {provider} payload: {source}")]
    InvalidBatch {
        path: PathBuf,
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The provider answered with an error status instead of articles.
    #[error("{provider} reported an error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

/// Capability shared by every provider adapter.
pub trait FetchArticles {
    /// Produce this source's articles in the common shape.
    async fn fetch(&self) -> Result<Vec<Article>, SourceError>;
}

/// A provider payload on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PayloadSource {
    /// Adapter name recorded as [`Article::provider`].
    pub name: String,
    pub path: PathBuf,
}

/// A feed export on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedSource {
    pub name: String,
    pub path: PathBuf,
    /// Language of the feeds, e.g. `de` for the Vorarlberg regional press.
    #[serde(default)]
    pub language: Option<String>,
    /// Entries kept per feed.
    #[serde(default = "feed::default_per_feed_limit")]
    pub per_feed_limit: usize,
}

/// Every provider this crate can read, selected from config at startup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    NewsApi(PayloadSource),
    Guardian(PayloadSource),
    MediaStack(PayloadSource),
    Feed(FeedSource),
    Articles(PayloadSource),
}

impl Source {
    pub fn name(&self) -> &str {
        match self {
            Source::NewsApi(s) | Source::Guardian(s) | Source::MediaStack(s) | Source::Articles(s) => &s.name,
            Source::Feed(s) => &s.name,
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            Source::NewsApi(_) => "NewsAPI",
            Source::Guardian(_) => "Guardian",
            Source::MediaStack(_) => "MediaStack",
            Source::Feed(_) => "feed",
            Source::Articles(_) => "articles",
        }
    }

    fn path(&self) -> &PathBuf {
        match self {
            Source::NewsApi(s) | Source::Guardian(s) | Source::MediaStack(s) | Source::Articles(s) => &s.path,
            Source::Feed(s) => &s.path,
        }
    }
}

impl FetchArticles for Source {
    #[instrument(level = "info", skip_all, fields(source = %self.name(), path = %self.path().display()))]
    async fn fetch(&self) -> Result<Vec<Article>, SourceError> {
        let path = self.path();
        let payload = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        let invalid = |source| SourceError::InvalidBatch {
            path: path.clone(),
            provider: self.provider(),
            source,
        };

        let articles = match self {
            Source::NewsApi(s) => newsapi::parse(&payload)
                .map_err(invalid)?
                .into_articles(&s.name)
                .map_err(|message| SourceError::Provider {
                    provider: "NewsAPI",
                    message,
                })?,
            Source::Guardian(s) => guardian::parse(&payload, &s.name).map_err(invalid)?,
            Source::MediaStack(s) => mediastack::parse(&payload, &s.name).map_err(invalid)?,
            Source::Feed(s) => feed::parse(&payload, s).map_err(invalid)?,
            Source::Articles(s) => {
                let mut articles: Vec<Article> = serde_json::from_str(&payload).map_err(invalid)?;
                for article in articles.iter_mut().filter(|a| a.provider.is_empty()) {
                    article.provider = s.name.clone();
                }
                articles
            }
        };

        info!(count = articles.len(), "Loaded articles");
        Ok(articles)
    }
}

/// Load every source concurrently. Failed sources are logged and skipped.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn load_all(sources: &[Source]) -> Vec<Article> {
    let batches: Vec<Vec<Article>> = stream::iter(sources)
        .map(|source| async move {
            match source.fetch().await {
                Ok(articles) => articles,
                Err(e) => {
                    error!(source = %source.name(), error = %e, "Source failed; skipping");
                    Vec::new()
                }
            }
        })
        .buffered(PARALLEL_SOURCES)
        .collect()
        .await;

    let articles: Vec<Article> = batches.into_iter().flatten().collect();
    info!(count = articles.len(), "Fetched {} articles in total", articles.len());
    articles
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Reduce an HTML fragment to plain text: tags dropped, entities decoded, whitespace collapsed.
pub fn html_to_text(fragment: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    let parsed = Html::parse_fragment(fragment);
    let text = parsed.root_element().text().collect::<Vec<_>>().join(" ");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vorarlberg_digest_sources_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(
            html_to_text("<p>Neue <b>Buslinie</b> in Bregenz &amp; Hard</p>\n<p>ab Montag</p>"),
            "Neue Buslinie in Bregenz & Hard ab Montag"
        );
        assert_eq!(html_to_text("plain"), "plain");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_source_config_is_tagged_by_kind() {
        let yaml = "- kind: guardian\n  name: Guardian\n  path: dumps/guardian.json\n\
                    - kind: feed\n  name: Austrian Local News\n  path: dumps/feeds.json\n  language: de\n";
        let sources: Vec<Source> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].provider(), "Guardian");
        match &sources[1] {
            Source::Feed(feed) => {
                assert_eq!(feed.language.as_deref(), Some("de"));
                assert_eq!(feed.per_feed_limit, feed::default_per_feed_limit());
            }
            other => panic!("expected feed source, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_normalized_articles_sets_provider() {
        let path = temp_file(
            "articles.json",
            r#"[{"title": "Bregenz", "url": "https://www.vol.at/1"}, {"title": "Wien", "provider": "ORF"}]"#,
        );
        let source = Source::Articles(PayloadSource {
            name: "Archive".to_string(),
            path,
        });
        let articles = source.fetch().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].provider, "Archive");
        assert_eq!(articles[1].provider, "ORF");
    }

    #[tokio::test]
    async fn test_invalid_batch_is_reported() {
        let path = temp_file("not_a_batch.json", r#"{"title": "single object"}"#);
        let source = Source::Articles(PayloadSource {
            name: "Archive".to_string(),
            path,
        });
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidBatch { provider: "articles", .. }));
    }

    #[tokio::test]
    async fn test_load_all_skips_failed_sources() {
        let good = temp_file("good.json", r#"[{"title": "Dornbirn"}]"#);
        let sources = vec![
            Source::Articles(PayloadSource {
                name: "Missing".to_string(),
                path: PathBuf::from("/nonexistent/vorarlberg_digest/missing.json"),
            }),
            Source::Articles(PayloadSource {
                name: "Good".to_string(),
                path: good,
            }),
        ];
        let articles = load_all(&sources).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Dornbirn");
    }
}
