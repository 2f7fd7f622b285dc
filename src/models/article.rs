use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sentiment::SentimentLabel;

pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Envelope returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "totalArticles")]
    pub total_articles: Option<u64>,
    /// `null` and a missing field both mean "no articles".
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
}

impl SearchResponse {
    pub fn into_articles(self) -> Vec<RawArticle> {
        self.articles.unwrap_or_default()
    }
}

/// An article record exactly as the API delivers it. Every field is optional
/// because the service does not guarantee any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Returns `None` when the record has no usable title.
    pub fn from_raw(raw: RawArticle) -> Option<Self> {
        let title = raw.title.filter(|t| !t.is_empty())?;

        let source = raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        let published_at = raw
            .published_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        Some(Self {
            title,
            description: raw.description.unwrap_or_default(),
            source,
            url: raw.url.unwrap_or_default(),
            published_at,
        })
    }

    /// Text handed to the polarity scorer: title and description joined by a
    /// space, trimmed.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.title, self.description).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}
