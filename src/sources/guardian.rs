//! Guardian content API adapter.
//!
//! Search results live under `response.results`. Teaser and body only appear
//! when the search asked for `show-fields`, and both are HTML.

use super::html_to_text;
use crate::models::Article;
use serde::Deserialize;

const OUTLET: &str = "The Guardian";

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Response,
}

#[derive(Debug, Deserialize)]
struct Response {
    results: Vec<RawResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawResult {
    web_title: String,
    web_url: String,
    web_publication_date: String,
    section_name: Option<String>,
    fields: Option<RawFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawFields {
    trail_text: Option<String>,
    body: Option<String>,
    byline: Option<String>,
}

pub fn parse(payload: &str, provider: &str) -> Result<Vec<Article>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(payload)?;
    Ok(envelope
        .response
        .results
        .into_iter()
        .map(|raw| {
            let fields = raw.fields.unwrap_or_default();
            Article {
                title: raw.web_title,
                description: fields.trail_text.as_deref().map(html_to_text).unwrap_or_default(),
                content: fields.body.as_deref().map(html_to_text).unwrap_or_default(),
                url: raw.web_url,
                published_at: raw.web_publication_date,
                source_name: OUTLET.to_string(),
                provider: provider.to_string(),
                category: raw.section_name.unwrap_or_default(),
                author: fields.byline.filter(|b| !b.is_empty()),
                language: Some("en".to_string()),
                ..Default::default()
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_are_mapped_and_html_stripped() {
        let payload = r#"{"response": {"status": "ok", "results": [{
            "id": "travel/2025/sep/25/bregenzerwald",
            "sectionName": "Travel",
            "webPublicationDate": "2025-09-25T05:00:00Z",
            "webTitle": "Walking the Bregenzerwald",
            "webUrl": "https://www.theguardian.com/travel/2025/sep/25/bregenzerwald",
            "fields": {
                "trailText": "<p>Cheese, <strong>cable cars</strong> and quiet trails</p>",
                "body": "<p>The Bregenzerwald in Vorarlberg&nbsp;is...</p>",
                "byline": "Jane Doe"
            }
        }, {
            "webTitle": "No fields",
            "webUrl": "https://www.theguardian.com/x",
            "webPublicationDate": "2025-09-24T05:00:00Z"
        }]}}"#;
        let articles = parse(payload, "Guardian").unwrap();
        assert_eq!(articles.len(), 2);
        let a = &articles[0];
        assert_eq!(a.description, "Cheese, cable cars and quiet trails");
        assert!(a.content.starts_with("The Bregenzerwald in Vorarlberg"));
        assert_eq!(a.source_name, "The Guardian");
        assert_eq!(a.category, "Travel");
        assert_eq!(a.author.as_deref(), Some("Jane Doe"));
        assert_eq!(articles[1].description, "");
    }

    #[test]
    fn test_missing_results_is_an_error() {
        assert!(parse(r#"{"response": {"status": "error"}}"#, "Guardian").is_err());
    }
}
