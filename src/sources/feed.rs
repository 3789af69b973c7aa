//! Regional feed adapter.
//!
//! The Vorarlberg press (vol.at, vn.at, ORF Vorarlberg, vorarlberg.at) is
//! read through feeds. Feed parsing happens upstream; this adapter reads the
//! entries it exported as JSON, either one feed object or a list of them:
//!
//! ```json
//! [{"title": "VOL.AT", "entries": [{"title": "...", "link": "...", "published": "...", "summary": "<p>...</p>"}]}]
//! ```

use super::{FeedSource, html_to_text};
use crate::models::Article;
use serde::Deserialize;

const DEFAULT_PER_FEED_LIMIT: usize = 10;
const LOCAL_NEWS_CATEGORY: &str = "Local News";
const FALLBACK_FEED_TITLE: &str = "Austrian News";

pub fn default_per_feed_limit() -> usize {
    DEFAULT_PER_FEED_LIMIT
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Export {
    Many(Vec<RawFeed>),
    One(RawFeed),
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    title: Option<String>,
    entries: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    title: Option<String>,
    link: Option<String>,
    published: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

pub fn parse(payload: &str, source: &FeedSource) -> Result<Vec<Article>, serde_json::Error> {
    let feeds = match serde_json::from_str::<Export>(payload)? {
        Export::Many(feeds) => feeds,
        Export::One(feed) => vec![feed],
    };

    let mut articles = Vec::new();
    for feed in feeds {
        let outlet = feed
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_FEED_TITLE.to_string());
        for entry in feed.entries.into_iter().take(source.per_feed_limit) {
            let text = entry
                .summary
                .or(entry.description)
                .map(|s| html_to_text(&s))
                .unwrap_or_default();
            articles.push(Article {
                title: entry.title.map(|t| html_to_text(&t)).unwrap_or_default(),
                content: text.clone(),
                description: text,
                url: entry.link.unwrap_or_default(),
                published_at: entry.published.unwrap_or_default(),
                source_name: outlet.clone(),
                provider: source.name.clone(),
                category: LOCAL_NEWS_CATEGORY.to_string(),
                author: entry.author.filter(|a| !a.is_empty()),
                language: source.language.clone(),
                ..Default::default()
            });
        }
    }
    Ok(articles)
}
