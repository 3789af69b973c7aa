//! NewsAPI response adapter.
//!
//! NewsAPI already uses the field names the engine expects (`publishedAt`,
//! `description`, `content`), so the mapping is mostly a copy. Error
//! responses carry `status: "error"` and a `message`.

use crate::models::Article;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Response {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawArticle {
    pub source: RawSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSource {
    pub name: Option<String>,
}

pub fn parse(payload: &str) -> Result<Response, serde_json::Error> {
    serde_json::from_str(payload)
}

impl Response {
    /// Articles of an `ok` response; the provider's message otherwise.
    pub fn into_articles(self, provider: &str) -> Result<Vec<Article>, String> {
        if self.status != "ok" {
            return Err(self.message.unwrap_or_else(|| "Unknown error".to_string()));
        }
        Ok(self
            .articles
            .into_iter()
            .map(|raw| Article {
                title: raw.title.unwrap_or_default(),
                description: raw.description.unwrap_or_default(),
                content: raw.content.unwrap_or_default(),
                url: raw.url.unwrap_or_default(),
                published_at: raw.published_at.unwrap_or_default(),
                source_name: raw.source.name.unwrap_or_default(),
                provider: provider.to_string(),
                author: raw.author.filter(|a| !a.is_empty()),
                ..Default::default()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_maps_fields() {
        let payload = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Der Standard"},
                "author": "APA",
                "title": "Pensionen steigen 2026",
                "description": "Die Pensionserhöhung ist fix.",
                "url": "https://www.derstandard.at/story/1",
                "publishedAt": "2025-09-25T06:00:00Z",
                "content": null
            }]
        }"#;
        let articles = parse(payload).unwrap().into_articles("NewsAPI").unwrap();
        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title, "Pensionen steigen 2026");
        assert_eq!(a.source_name, "Der Standard");
        assert_eq!(a.provider, "NewsAPI");
        assert_eq!(a.published_at, "2025-09-25T06:00:00Z");
        assert_eq!(a.content, "");
        assert_eq!(a.author.as_deref(), Some("APA"));
    }

    #[test]
    fn test_error_response_returns_message() {
        let payload = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let err = parse(payload).unwrap().into_articles("NewsAPI").unwrap_err();
        assert_eq!(err, "Your API key is invalid.");
    }
}
