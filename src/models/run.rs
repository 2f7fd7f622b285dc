use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::article::AnalyzedArticle;
use super::sentiment::SentimentCounts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The request or the decoding of its body failed.
    FetchFailed(String),
    /// The service answered but nothing survived the title filter.
    NoArticles,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::FetchFailed(_))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FetchFailed(detail) => write!(f, "Error fetching news: {}", detail),
            Diagnostic::NoArticles => write!(f, "No articles found for this query."),
        }
    }
}

/// Output of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub query: String,
    pub articles: Vec<AnalyzedArticle>,
    pub diagnostic: Option<Diagnostic>,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default)]
    pub from_cache: bool,
}

impl AnalysisRun {
    pub fn analyzed(query: &str, articles: Vec<AnalyzedArticle>) -> Self {
        let diagnostic = if articles.is_empty() {
            Some(Diagnostic::NoArticles)
        } else {
            None
        };
        Self {
            query: query.to_string(),
            articles,
            diagnostic,
            analyzed_at: Utc::now(),
            from_cache: false,
        }
    }

    pub fn failed(query: &str, detail: impl Into<String>) -> Self {
        Self {
            query: query.to_string(),
            articles: Vec::new(),
            diagnostic: Some(Diagnostic::FetchFailed(detail.into())),
            analyzed_at: Utc::now(),
            from_cache: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn counts(&self) -> SentimentCounts {
        SentimentCounts::from_articles(&self.articles)
    }
}
