//! One digest run over an in-memory batch.
//!
//! 1. **Filter**: keep articles the [`RelevanceScorer`] accepts
//! 2. **Rank**: newest first; unparseable dates sort last
//! 3. **Cap**: keep the newest `max_articles`
//! 4. **Enrich**: flag Austrian sources and German text
//! 5. **Categorize**: drop each article into every bucket it belongs to
//! 6. **Compile**: cap each bucket and render the digest
//!
//! Everything here is synchronous and works on owned data; the caller
//! decides where articles come from and where the results go.

use crate::categorize::Categorizer;
use crate::config::Config;
use crate::dates::sort_key;
use crate::digest::DigestCompiler;
use crate::enrich::annotate;
use crate::models::{Article, CategoryBuckets, DigestReport};
use crate::scoring::RelevanceScorer;
use chrono::NaiveDateTime;
use itertools::Itertools;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run the whole batch as of `now`.
    #[instrument(level = "info", skip_all, fields(batch = articles.len()))]
    pub fn run(&self, articles: Vec<Article>, now: NaiveDateTime) -> DigestReport {
        let config = self.config;
        let taxonomy = &config.taxonomy;
        let scorer = RelevanceScorer::new(taxonomy, config.scoring.clone());
        let categorizer = Categorizer::new(taxonomy, config.categories.clone());

        let total = articles.len();
        let mut relevant: Vec<Article> = articles
            .into_iter()
            .filter(|a| scorer.is_relevant(a, now))
            .collect();
        info!(total, relevant = relevant.len(), "Found {} relevant articles", relevant.len());

        // stable: equal timestamps keep fetch order
        relevant.sort_by_key(|a| std::cmp::Reverse(sort_key(&a.published_at)));

        let max_articles = config.batch.max_articles;
        if relevant.len() > max_articles {
            info!(from = relevant.len(), to = max_articles, "Limiting batch");
            relevant.truncate(max_articles);
        }

        for article in relevant.iter_mut() {
            annotate(article, taxonomy);
        }

        let mut buckets = CategoryBuckets::default();
        for article in &relevant {
            for category in categorizer.categorize(article).categories() {
                buckets.push(category, article.clone());
            }
        }
        buckets.truncate_each(config.digest.max_per_category);

        let counts = buckets.counts();
        info!(
            counts = %counts.iter().map(|(c, n)| format!("{c}={n}")).join(", "),
            "Categorized articles"
        );

        let digest = DigestCompiler::new(config.digest.clone()).compile(&buckets, now.date());
        DigestReport {
            digest,
            counts,
            articles: relevant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchSettings;
    use crate::models::Category;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 25)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn local(title: &str, description: &str, url: &str, hours_ago: i64) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            published_at: (now() - Duration::hours(hours_ago))
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
            source_name: "VOL.AT".to_string(),
            ..Default::default()
        }
    }

    fn batch() -> Vec<Article> {
        vec![
            local(
                "Vorarlberg ski resort opens early season",
                "Skiing fans from Bregenz can hit the slopes this weekend.",
                "https://www.vol.at/ski",
                2,
            ),
            local(
                "Live updates: storm over Bregenz",
                "Vorarlberg braces for wind.",
                "https://www.vol.at/storm",
                1,
            ),
            local(
                "Hiking trails reopen in Scotland",
                "",
                "https://example.com/scotland",
                1,
            ),
            local(
                "New hospital wing in Feldkirch, Vorarlberg",
                "Healthcare for seniors in Vorarlberg improves.",
                "https://www.vn.at/hospital",
                5,
            ),
            local(
                "Old news from Dornbirn, Vorarlberg",
                "Lustenau and Hohenems too.",
                "https://www.vol.at/old",
                24 * 6,
            ),
        ]
    }

    #[test]
    fn test_run_filters_ranks_and_compiles() {
        let config = Config::default();
        let report = Pipeline::new(&config).run(batch(), now());

        let urls: Vec<_> = report.articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://www.vol.at/ski", "https://www.vn.at/hospital"]);
        assert!(report.articles.iter().all(|a| a.is_austrian_source == Some(true)));

        let vorarlberg = report.counts.iter().find(|(c, _)| *c == Category::Vorarlberg).unwrap();
        assert_eq!(vorarlberg.1, 2);
        let healthcare = report.counts.iter().find(|(c, _)| *c == Category::Healthcare).unwrap();
        assert_eq!(healthcare.1, 1);

        assert!(report.digest.contains("Found 2 relevant articles today."));
        assert!(report.digest.contains("## Vorarlberg News (2 articles)"));
        // the hospital story is already listed under Vorarlberg
        assert!(!report.digest.contains("## Healthcare News"));
        assert_eq!(report.digest.matches("https://www.vn.at/hospital").count(), 1);
    }

    #[test]
    fn test_batch_cap_keeps_newest() {
        let config = Config {
            batch: BatchSettings { max_articles: 1 },
            ..Default::default()
        };
        let report = Pipeline::new(&config).run(batch(), now());
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].url, "https://www.vol.at/ski");
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let config = Config::default();
        let mut undated = local(
            "Bregenz festival opera premiere in Vorarlberg",
            "Bregenzer Festspiele on Lake Constance.",
            "https://www.vol.at/opera",
            0,
        );
        undated.published_at = "soon".to_string();
        let mut articles = vec![undated];
        articles.extend(batch());

        let report = Pipeline::new(&config).run(articles, now());
        assert_eq!(report.articles.last().map(|a| a.url.as_str()), Some("https://www.vol.at/opera"));
    }

    #[test]
    fn test_empty_batch_still_renders_header() {
        let config = Config::default();
        let report = Pipeline::new(&config).run(Vec::new(), now());
        assert!(report.articles.is_empty());
        assert!(report.digest.starts_with("# Daily News Digest for American Expat in Vorarlberg"));
        assert!(report.digest.contains("Found 0 relevant articles today."));
    }
}
