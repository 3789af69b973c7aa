//! Light enrichment applied after filtering.
//!
//! Full-text extraction, summarization and translation belong to external
//! collaborators. What stays here is cheap and local: flagging Austrian
//! sources and spotting German text so downstream consumers know what they
//! are looking at.

use crate::models::Article;
use crate::taxonomy::{KeywordTaxonomy, contains_word, host_matches};
use tracing::debug;

const GERMAN_INDICATORS: [&str; 9] = ["und", "der", "die", "das", "für", "mit", "von", "bei", "ist"];
const GERMAN_MIN_INDICATORS: usize = 3;
const LANGUAGE_SAMPLE_CHARS: usize = 500;

/// Heuristic German detection on the first characters of `text`.
pub fn looks_german(text: &str) -> bool {
    let sample: String = text.chars().take(LANGUAGE_SAMPLE_CHARS).collect::<String>().to_lowercase();
    GERMAN_INDICATORS
        .iter()
        .filter(|w| contains_word(&sample, w))
        .count()
        >= GERMAN_MIN_INDICATORS
}

/// Mark Austrian sources and, for them, detect German text when no language hint exists.
pub fn annotate(article: &mut Article, taxonomy: &KeywordTaxonomy) {
    let austrian = article
        .host()
        .is_some_and(|h| host_matches(&h, &taxonomy.geo.enrichment_domains));
    if !austrian {
        return;
    }
    article.is_austrian_source = Some(true);

    if article.language.is_none() {
        let sample = article
            .full_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&article.description);
        if looks_german(sample) {
            article.language = Some("de".to_string());
        }
    }
    debug!(url = %article.url, language = ?article.language, "Annotated Austrian source");
}
