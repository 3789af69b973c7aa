//! Markdown digest compilation.
//!
//! The compiler walks the category buckets in [`Category::PRIORITY`] order and
//! renders each article at most once across the whole digest. An article is a
//! duplicate when its URL or its normalized title has already been rendered in
//! an earlier section; titles are compared with the translation marker
//! stripped, so a translated and an untranslated copy of the same story
//! collapse into one entry.
//!
//! Deduplication carries state from one section to the next, so sections are
//! rendered strictly in order.
//!
//! # Output
//!
//! ```text
//! # Daily News Digest for American Expat in Vorarlberg
//!
//! ## Thursday, September 25, 2025
//!
//! Found 7 relevant articles today.
//!
//! ## Vorarlberg News (3 articles)
//!
//! ### [Title](https://www.vol.at/...)
//! **Source:** Vorarlberg Online
//!
//! Summary text...
//!
//! ---
//! ```

use crate::models::{Article, CategoryBuckets};
use crate::utils::truncate_summary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Suffix appended to titles by the translation collaborator.
pub const TRANSLATION_MARKER: &str = " [Translated from German]";
pub const MAX_PER_CATEGORY: usize = 5;
pub const SUMMARY_MAX_CHARS: usize = 300;

const DIGEST_TITLE: &str = "Daily News Digest for American Expat in Vorarlberg";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DigestSettings {
    /// Entries rendered per section.
    pub max_per_category: usize,
    /// Summaries longer than this are cut and end in `...`.
    pub summary_max_chars: usize,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            max_per_category: MAX_PER_CATEGORY,
            summary_max_chars: SUMMARY_MAX_CHARS,
        }
    }
}

/// Title used for duplicate detection.
pub fn normalized_title(title: &str) -> String {
    title.trim().replace(TRANSLATION_MARKER.trim(), "").trim().to_string()
}

/// URLs and titles already rendered.
#[derive(Debug, Clone, Default)]
struct Seen {
    urls: HashSet<String>,
    titles: HashSet<String>,
}

impl Seen {
    fn contains(&self, article: &Article) -> bool {
        let url = article.url.trim();
        let title = normalized_title(&article.title);
        (!url.is_empty() && self.urls.contains(url)) || (!title.is_empty() && self.titles.contains(&title))
    }

    fn insert(&mut self, article: &Article) {
        let url = article.url.trim();
        if !url.is_empty() {
            self.urls.insert(url.to_string());
        }
        let title = normalized_title(&article.title);
        if !title.is_empty() {
            self.titles.insert(title);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DigestCompiler {
    settings: DigestSettings,
}

impl DigestCompiler {
    pub fn new(settings: DigestSettings) -> Self {
        Self { settings }
    }

    /// Number of distinct articles across all buckets, by URL or, lacking one, by title.
    pub fn distinct_count(buckets: &CategoryBuckets) -> usize {
        buckets
            .iter()
            .flat_map(|(_, articles)| articles.iter())
            .map(|a| {
                let url = a.url.trim();
                if url.is_empty() {
                    format!("title:{}", normalized_title(&a.title))
                } else {
                    format!("url:{url}")
                }
            })
            .collect::<HashSet<_>>()
            .len()
    }

    /// Render the digest for `date`.
    #[instrument(level = "info", skip_all, fields(%date))]
    pub fn compile(&self, buckets: &CategoryBuckets, date: NaiveDate) -> String {
        let total = Self::distinct_count(buckets);
        let mut digest = String::new();
        digest.push_str(&format!(
            "# {DIGEST_TITLE}\n\n## {}\n\nFound {total} relevant articles today.\n\n",
            date.format("%A, %B %d, %Y")
        ));

        let mut seen = Seen::default();
        let mut rendered = 0usize;
        for (category, articles) in buckets.iter() {
            let mut pending = seen.clone();
            let fresh: Vec<&Article> = articles
                .iter()
                .filter(|a| {
                    if pending.contains(a) {
                        false
                    } else {
                        pending.insert(a);
                        true
                    }
                })
                .collect();

            if fresh.len() < articles.len() {
                debug!(%category, skipped = articles.len() - fresh.len(), "Skipped duplicate articles");
            }
            if fresh.is_empty() {
                continue;
            }

            digest.push_str(&format!("## {} News ({} articles)\n\n", category.label(), fresh.len()));
            for article in fresh.into_iter().take(self.settings.max_per_category) {
                self.render_entry(&mut digest, article);
                seen.insert(article);
                rendered += 1;
            }
        }

        info!(total, rendered, "Compiled digest");
        digest
    }

    fn render_entry(&self, digest: &mut String, article: &Article) {
        let title = match article.title.trim() {
            "" => "No title",
            t => t,
        };
        let url = match article.url.trim() {
            "" => "#",
            u => u,
        };
        let summary = match article.display_summary().trim() {
            "" => "No summary available".to_string(),
            s => truncate_summary(s, self.settings.summary_max_chars),
        };
        digest.push_str(&format!(
            "### [{title}]({url})\n**Source:** {}\n\n{summary}\n\n---\n\n",
            article.display_source()
        ));
    }
}
