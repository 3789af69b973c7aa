//! Category assignment.
//!
//! The categorizer answers a different question than the scorer: not "is this
//! worth reading" but "which section does it belong in". Each category gets
//! its own title-weighted score, and the low-specificity categories are gated
//! on an Austria connection.

use crate::models::{Article, Category, CategoryAssignment};
use crate::taxonomy::{KeywordTaxonomy, contains_any};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TITLE_HIT_WEIGHT: u32 = 3;
pub const MIN_CATEGORY_SCORE: u32 = 2;
pub const AUSTRIA_TITLE_MIN_CATEGORY_SCORE: u32 = 1;
pub const VORARLBERG_MIN_SCORE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryThresholds {
    /// Weight of a keyword found in the title; hits elsewhere weigh 1.
    pub title_weight: u32,
    pub min_score: u32,
    /// Used instead of `min_score` when the title names Austria, Vorarlberg or Vienna.
    pub austria_title_min_score: u32,
    pub vorarlberg_min_score: u32,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            title_weight: TITLE_HIT_WEIGHT,
            min_score: MIN_CATEGORY_SCORE,
            austria_title_min_score: AUSTRIA_TITLE_MIN_CATEGORY_SCORE,
            vorarlberg_min_score: VORARLBERG_MIN_SCORE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Categorizer<'a> {
    taxonomy: &'a KeywordTaxonomy,
    thresholds: CategoryThresholds,
}

impl<'a> Categorizer<'a> {
    pub fn new(taxonomy: &'a KeywordTaxonomy, thresholds: CategoryThresholds) -> Self {
        Self {
            taxonomy,
            thresholds,
        }
    }

    /// Title-weighted score of one category. Each keyword counts once, however often it repeats.
    #[cfg(test)]
    pub fn category_score(&self, article: &Article, category: Category) -> u32 {
        let title = article.title.to_lowercase();
        let all = article.combined_text();
        self.score_in(&title, &all, category)
    }

    fn score_in(&self, title: &str, all: &str, category: Category) -> u32 {
        self.taxonomy
            .keywords(category)
            .iter()
            .filter(|k| all.contains(k.as_str()))
            .map(|k| {
                if title.contains(k.as_str()) {
                    self.thresholds.title_weight
                } else {
                    1
                }
            })
            .sum()
    }

    pub fn categorize(&self, article: &Article) -> CategoryAssignment {
        let geo = &self.taxonomy.geo;
        let title = article.title.to_lowercase();
        let all = article.combined_text();

        let min_score = if contains_any(&title, &geo.austria_title) {
            self.thresholds.austria_title_min_score
        } else {
            self.thresholds.min_score
        };
        let austrian_source = self.taxonomy.is_austrian_domain(article.host().as_deref());
        let austria_linked = austrian_source || contains_any(&all, &geo.austria_connection);

        let mut assignment = CategoryAssignment::default();
        for category in Category::PRIORITY {
            let score = self.score_in(&title, &all, category);
            let member = match category {
                Category::Vorarlberg => {
                    score >= self.thresholds.vorarlberg_min_score
                        || title.contains("vorarlberg")
                        || austrian_source
                }
                // being abroad is the whole point; no Austria gate
                Category::AmericanExpat => score >= min_score,
                Category::Healthcare
                | Category::Retirement
                | Category::OutdoorActivities
                | Category::CulturalEvents => score >= min_score && austria_linked,
            };
            assignment.set(category, member);
        }

        if austrian_source && assignment.is_empty() {
            assignment.set(Category::Vorarlberg, true);
        }

        debug!(
            url = %article.url,
            categories = ?assignment.categories().collect::<Vec<_>>(),
            "Categorized article"
        );
        assignment
    }
}
