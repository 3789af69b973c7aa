//! Data models shared by the scoring engine, the categorizer and the digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: one normalized news record, whatever provider it came from
//! - [`ScoreResult`]: the relevance verdict for one article
//! - [`Category`] and [`CategoryAssignment`]: the fixed topical buckets
//! - [`CategoryBuckets`]: articles grouped per category, in priority order
//! - [`DigestReport`]: everything a run hands back to its caller
//!
//! Field names follow the upstream JSON contract, so `published_at` travels as
//! `publishedAt` on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized news article.
///
/// Provider adapters translate their payloads into this shape before anything
/// reaches the engine. Every field defaults to empty, so a sparse record is
/// still processable; it simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Article {
    /// Headline as published (or translated upstream).
    pub title: String,
    /// Teaser or trail text.
    pub description: String,
    /// Body text, often truncated by the provider.
    pub content: String,
    /// Canonical link; the identity of the article within a batch.
    pub url: String,
    /// Publication timestamp in whatever format the provider uses.
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    /// Outlet name, e.g. "The Guardian" or "Vorarlberg Online".
    pub source_name: String,
    /// Adapter that produced the record, e.g. "Guardian" or "Austrian Local News".
    pub provider: String,
    /// Provider-assigned category. Not used for the engine's own categories.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Two-letter language hint, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Summary attached by an enrichment collaborator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full extracted text attached by an enrichment collaborator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_austrian_source: Option<bool>,
}

impl Article {
    /// Lowercased `title description content`, the text every keyword check runs against.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.content).to_lowercase()
    }

    /// Host part of the URL, lowercased. `None` for empty or unparseable URLs.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(self.url.trim())
            .ok()
            .and_then(|parsed| parsed.host_str().map(|h| h.to_lowercase()))
    }

    /// Summary for display: the enrichment summary when present, else the description.
    pub fn display_summary(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => &self.description,
        }
    }

    /// Outlet name for display, falling back to the provider name.
    pub fn display_source(&self) -> &str {
        if !self.source_name.trim().is_empty() {
            &self.source_name
        } else if !self.provider.trim().is_empty() {
            &self.provider
        } else {
            "Unknown source"
        }
    }
}

/// Which hard exclusion rejected an article, or that it scored too low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    LiveContent,
    LiveUrl,
    NonRelevantRegion,
    ExcludedCountry,
    Stale,
    LowScore,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::LiveContent => "live content in title",
            Rejection::LiveUrl => "live blog url",
            Rejection::NonRelevantRegion => "non-relevant region in title",
            Rejection::ExcludedCountry => "excluded country without austria marker",
            Rejection::Stale => "older than recency window",
            Rejection::LowScore => "score below threshold",
        };
        f.write_str(reason)
    }
}

/// Outcome of scoring one article. Recomputed every run, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    /// Accumulated weighted score; zero when a hard exclusion fired first.
    pub score: i32,
    pub accepted: bool,
    pub rejection: Option<Rejection>,
}

impl ScoreResult {
    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            score: 0,
            accepted: false,
            rejection: Some(rejection),
        }
    }
}

/// The six topical buckets of the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Category {
    Vorarlberg,
    AmericanExpat,
    Healthcare,
    Retirement,
    OutdoorActivities,
    CulturalEvents,
}

impl Category {
    /// Digest order: local news first, then expat matters, then the rest.
    pub const PRIORITY: [Category; 6] = [
        Category::Vorarlberg,
        Category::AmericanExpat,
        Category::Healthcare,
        Category::Retirement,
        Category::OutdoorActivities,
        Category::CulturalEvents,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Vorarlberg => "Vorarlberg",
            Category::AmericanExpat => "American Expat",
            Category::Healthcare => "Healthcare",
            Category::Retirement => "Retirement",
            Category::OutdoorActivities => "Outdoor Activities",
            Category::CulturalEvents => "Cultural Events",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Membership of one article in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryAssignment {
    members: [bool; 6],
}

impl CategoryAssignment {
    pub fn set(&mut self, category: Category, member: bool) {
        self.members[category.index()] = member;
    }

    pub fn contains(&self, category: Category) -> bool {
        self.members[category.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|m| *m)
    }

    /// Member categories in priority order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::PRIORITY
            .into_iter()
            .filter(|c| self.contains(*c))
    }
}

/// Articles grouped per category. Order inside a bucket is the caller's order.
#[derive(Debug, Clone, Default)]
pub struct CategoryBuckets {
    buckets: [Vec<Article>; 6],
}

impl CategoryBuckets {
    pub fn push(&mut self, category: Category, article: Article) {
        self.buckets[category.index()].push(article);
    }

    pub fn get(&self, category: Category) -> &[Article] {
        &self.buckets[category.index()]
    }

    /// Keep at most `max` articles in every bucket.
    pub fn truncate_each(&mut self, max: usize) {
        for bucket in self.buckets.iter_mut() {
            bucket.truncate(max);
        }
    }

    /// Buckets in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Article])> + '_ {
        Category::PRIORITY
            .into_iter()
            .map(|c| (c, self.get(c)))
    }

    pub fn counts(&self) -> Vec<(Category, usize)> {
        self.iter().map(|(c, articles)| (c, articles.len())).collect()
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct DigestReport {
    /// Rendered Markdown digest.
    pub digest: String,
    /// Bucket sizes per category, in priority order.
    pub counts: Vec<(Category, usize)>,
    /// The filtered, enriched article list, newest first.
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserializes_sparse_record() {
        let json = r#"{"title": "Hallo", "publishedAt": "2025-09-25"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Hallo");
        assert_eq!(article.published_at, "2025-09-25");
        assert!(article.url.is_empty());
        assert!(article.summary.is_none());
    }

    #[test]
    fn test_article_serialization_skips_absent_enrichment() {
        let article = Article {
            title: "Test".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"publishedAt\""));
        assert!(!json.contains("full_text"));
    }

    #[test]
    fn test_host_lowercases_and_handles_garbage() {
        let article = Article {
            url: "https://WWW.Vol.at/news/123".to_string(),
            ..Default::default()
        };
        assert_eq!(article.host().as_deref(), Some("www.vol.at"));

        let broken = Article {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(broken.host(), None);
    }

    #[test]
    fn test_display_fallbacks() {
        let mut article = Article {
            description: "Teaser".to_string(),
            provider: "Guardian".to_string(),
            ..Default::default()
        };
        assert_eq!(article.display_summary(), "Teaser");
        assert_eq!(article.display_source(), "Guardian");

        article.summary = Some("Summary".to_string());
        article.source_name = "The Guardian".to_string();
        assert_eq!(article.display_summary(), "Summary");
        assert_eq!(article.display_source(), "The Guardian");

        assert_eq!(Article::default().display_source(), "Unknown source");
    }

    #[test]
    fn test_assignment_iterates_in_priority_order() {
        let mut assignment = CategoryAssignment::default();
        assert!(assignment.is_empty());
        assignment.set(Category::CulturalEvents, true);
        assignment.set(Category::Vorarlberg, true);
        let members: Vec<_> = assignment.categories().collect();
        assert_eq!(members, vec![Category::Vorarlberg, Category::CulturalEvents]);
    }

    #[test]
    fn test_buckets_truncate_and_count() {
        let mut buckets = CategoryBuckets::default();
        for i in 0..7 {
            buckets.push(
                Category::Healthcare,
                Article {
                    url: format!("https://example.com/{i}"),
                    ..Default::default()
                },
            );
        }
        buckets.truncate_each(5);
        assert_eq!(buckets.get(Category::Healthcare).len(), 5);
        let counts = buckets.counts();
        assert_eq!(counts[0], (Category::Vorarlberg, 0));
        assert_eq!(counts[2], (Category::Healthcare, 5));
    }
}
