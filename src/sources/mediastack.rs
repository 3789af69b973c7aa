//! MediaStack news API adapter.
//!
//! MediaStack has no article body, so `content` repeats the description.

use crate::models::Article;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Response {
    data: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<String>,
    category: Option<String>,
    language: Option<String>,
    published_at: Option<String>,
}

pub fn parse(payload: &str, provider: &str) -> Result<Vec<Article>, serde_json::Error> {
    let response: Response = serde_json::from_str(payload)?;
    Ok(response
        .data
        .into_iter()
        .map(|raw| {
            let description = raw.description.unwrap_or_default();
            Article {
                title: raw.title.unwrap_or_default(),
                content: description.clone(),
                description,
                url: raw.url.unwrap_or_default(),
                published_at: raw.published_at.unwrap_or_default(),
                source_name: raw.source.unwrap_or_else(|| "MediaStack".to_string()),
                provider: provider.to_string(),
                category: raw.category.unwrap_or_default(),
                author: raw.author.filter(|a| !a.is_empty()),
                language: raw.language.filter(|l| !l.is_empty()),
                ..Default::default()
            }
        })
        .collect())
}
