//! Relevance scoring.
//!
//! [`RelevanceScorer`] decides whether an article is worth a place in the
//! digest. It runs hard exclusions first (live coverage, foreign news, stale
//! news) and only then adds up weighted keyword signals. An exclusion cannot
//! be outweighed: a live blog about Bregenz is still a live blog.
//!
//! # Scoring
//!
//! | Signal | Default weight |
//! |--------|----------------|
//! | Vorarlberg keyword in title | 7 |
//! | Healthcare / Retirement / Expat keyword in title | 3 each |
//! | Outdoor / Cultural keyword in title, Austria-linked | 4 each |
//! | URL on an Austrian regional news domain | 3 |
//! | Vorarlberg keyword in description or content | 4 |
//! | Healthcare / Retirement / Expat keyword in body | 2 each |
//! | Outdoor / Cultural keyword in body, Austria-linked | 2 each |
//! | 3+ distinct keywords anywhere / exactly 2 | 3 / 1 |
//!
//! An article is accepted when the total reaches [`ScoringWeights::accept_threshold`].

use crate::dates::parse_published;
use crate::models::{Article, Category, Rejection, ScoreResult};
use crate::taxonomy::{KeywordTaxonomy, contains_any, find_word, starts_any_word};
use crate::utils::truncate_for_log;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub const VORARLBERG_TITLE_WEIGHT: i32 = 7;
pub const TOPIC_TITLE_WEIGHT: i32 = 3;
pub const LINKED_TITLE_WEIGHT: i32 = 4;
pub const AUSTRIAN_DOMAIN_WEIGHT: i32 = 3;
pub const VORARLBERG_BODY_WEIGHT: i32 = 4;
pub const TOPIC_BODY_WEIGHT: i32 = 2;
pub const LINKED_BODY_WEIGHT: i32 = 2;
pub const BREADTH_WIDE_WEIGHT: i32 = 3;
pub const BREADTH_NARROW_WEIGHT: i32 = 1;
pub const ACCEPT_THRESHOLD: i32 = 6;
pub const MAX_AGE_DAYS: i64 = 3;

/// Characters of the description inspected together with the title by the country check.
const DESCRIPTION_LEAD_CHARS: usize = 100;

/// Tunable weights and thresholds. Defaults are the constants above.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub vorarlberg_title: i32,
    pub topic_title: i32,
    pub linked_title: i32,
    pub austrian_domain: i32,
    pub vorarlberg_body: i32,
    pub topic_body: i32,
    pub linked_body: i32,
    pub breadth_wide: i32,
    pub breadth_narrow: i32,
    pub accept_threshold: i32,
    /// Articles older than this many whole days are dropped.
    pub max_age_days: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            vorarlberg_title: VORARLBERG_TITLE_WEIGHT,
            topic_title: TOPIC_TITLE_WEIGHT,
            linked_title: LINKED_TITLE_WEIGHT,
            austrian_domain: AUSTRIAN_DOMAIN_WEIGHT,
            vorarlberg_body: VORARLBERG_BODY_WEIGHT,
            topic_body: TOPIC_BODY_WEIGHT,
            linked_body: LINKED_BODY_WEIGHT,
            breadth_wide: BREADTH_WIDE_WEIGHT,
            breadth_narrow: BREADTH_NARROW_WEIGHT,
            accept_threshold: ACCEPT_THRESHOLD,
            max_age_days: MAX_AGE_DAYS,
        }
    }
}

/// Lowercased views of an article, computed once per evaluation.
struct ArticleText {
    title: String,
    body: String,
    all: String,
    url: String,
    lead: String,
}

impl ArticleText {
    fn new(article: &Article) -> Self {
        let title = article.title.to_lowercase();
        let description = article.description.to_lowercase();
        let content = article.content.to_lowercase();
        let lead: String = description.chars().take(DESCRIPTION_LEAD_CHARS).collect();
        Self {
            lead: format!("{title} {lead}"),
            body: format!("{description} {content}"),
            all: format!("{title} {description} {content}"),
            url: article.url.to_lowercase(),
            title,
        }
    }
}

/// Scores articles against a borrowed taxonomy. Holds no per-article state.
#[derive(Debug, Clone)]
pub struct RelevanceScorer<'a> {
    taxonomy: &'a KeywordTaxonomy,
    weights: ScoringWeights,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(taxonomy: &'a KeywordTaxonomy, weights: ScoringWeights) -> Self {
        Self { taxonomy, weights }
    }

    /// Accept/reject an article as of `now`, the caller's local wall-clock time.
    pub fn is_relevant(&self, article: &Article, now: NaiveDateTime) -> bool {
        self.evaluate(article, now).accepted
    }

    /// Run every stage against `now` and log the decision.
    #[instrument(level = "debug", skip_all, fields(url = %article.url))]
    pub fn evaluate(&self, article: &Article, now: NaiveDateTime) -> ScoreResult {
        let text = ArticleText::new(article);
        let result = match self.exclusion(article, &text, now) {
            Some(rejection) => ScoreResult::rejected(rejection),
            None => {
                let score = self.weighted_score(article, &text);
                let accepted = score >= self.weights.accept_threshold;
                ScoreResult {
                    score,
                    accepted,
                    rejection: (!accepted).then_some(Rejection::LowScore),
                }
            }
        };

        let title = truncate_for_log(&article.title, 120);
        match result.rejection {
            None => debug!(score = result.score, %title, "Accepted article"),
            Some(reason) => info!(score = result.score, %reason, %title, "Filtering out article"),
        }
        result
    }

    /// Stages 1 to 3. The first exclusion that fires wins.
    fn exclusion(&self, article: &Article, text: &ArticleText, now: NaiveDateTime) -> Option<Rejection> {
        let geo = &self.taxonomy.geo;

        if contains_any(&text.title, &geo.live_title) {
            return Some(Rejection::LiveContent);
        }
        if contains_any(&text.url, &geo.live_url) {
            return Some(Rejection::LiveUrl);
        }

        if find_word(&text.title, &geo.non_relevant_regions).is_some()
            && !starts_any_word(&text.title, &geo.region_rescue)
            && !starts_any_word(&text.url, &geo.region_rescue)
        {
            return Some(Rejection::NonRelevantRegion);
        }
        if find_word(&text.lead, &geo.excluded_countries).is_some()
            && !starts_any_word(&text.lead, &geo.country_rescue)
        {
            return Some(Rejection::ExcludedCountry);
        }

        if !article.published_at.trim().is_empty() {
            match parse_published(&article.published_at) {
                Some(published) => {
                    let age_days = (now - published).num_days();
                    if age_days > self.weights.max_age_days {
                        return Some(Rejection::Stale);
                    }
                }
                None => warn!(
                    published_at = %article.published_at,
                    title = %truncate_for_log(&article.title, 120),
                    "Could not parse publication date; skipping recency check"
                ),
            }
        }
        None
    }

    /// Stage 4 alone, ignoring every exclusion.
    #[cfg(test)]
    pub fn score(&self, article: &Article) -> i32 {
        self.weighted_score(article, &ArticleText::new(article))
    }

    fn weighted_score(&self, article: &Article, text: &ArticleText) -> i32 {
        let taxonomy = self.taxonomy;
        let geo = &taxonomy.geo;
        let w = &self.weights;
        let in_title = |c: Category| contains_any(&text.title, taxonomy.keywords(c));
        let in_body = |c: Category| contains_any(&text.body, taxonomy.keywords(c));

        let outdoor_linked = contains_any(&text.all, &geo.outdoor_connection);
        let cultural_linked = contains_any(&text.all, &geo.cultural_connection);

        let mut score = 0;

        if in_title(Category::Vorarlberg) {
            score += w.vorarlberg_title;
        }
        for topic in [Category::Healthcare, Category::Retirement, Category::AmericanExpat] {
            if in_title(topic) {
                score += w.topic_title;
            }
        }
        // outdoor and cultural words are everywhere; only count them with an Austria tie-in
        if in_title(Category::OutdoorActivities) && outdoor_linked {
            score += w.linked_title;
        }
        if in_title(Category::CulturalEvents) && cultural_linked {
            score += w.linked_title;
        }

        if taxonomy.is_austrian_domain(article.host().as_deref()) {
            score += w.austrian_domain;
        }

        if in_body(Category::Vorarlberg) {
            score += w.vorarlberg_body;
        }
        for topic in [Category::Healthcare, Category::Retirement, Category::AmericanExpat] {
            if in_body(topic) {
                score += w.topic_body;
            }
        }
        if in_body(Category::OutdoorActivities) && outdoor_linked {
            score += w.linked_body;
        }
        if in_body(Category::CulturalEvents) && cultural_linked {
            score += w.linked_body;
        }

        let distinct = taxonomy
            .all_keywords()
            .filter(|k| text.all.contains(k))
            .count();
        score += match distinct {
            0 | 1 => 0,
            2 => w.breadth_narrow,
            _ => w.breadth_wide,
        };

        score
    }
}
