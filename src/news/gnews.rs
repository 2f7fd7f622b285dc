use async_trait::async_trait;
use reqwest::{header, Client, Url};

use crate::config::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use crate::models::{RawArticle, SearchResponse};
use crate::news::source::NewsSource;

/// Language filter applied to every search.
pub const SEARCH_LANGUAGE: &str = "en";

pub struct GNewsClient {
    client: Client,
    base_url: String,
}

impl GNewsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("newsdash/0.1"),
        );

        // No request timeout: a run waits for the service to answer.
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/search?q=<query>&lang=en&token=<credential>`
    pub fn search_url(&self, query: &str, credential: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[("q", query), ("lang", SEARCH_LANGUAGE), ("token", credential)],
        )
        .map_err(|e| Error::Config(format!("Invalid news API base URL {}: {}", self.base_url, e)))
    }
}

#[async_trait]
impl NewsSource for GNewsClient {
    async fn search(&self, query: &str, credential: &str) -> Result<Vec<RawArticle>> {
        let url = self.search_url(query, credential)?;
        tracing::debug!(
            "GET {}/search?q={:?}&lang={}&token=<redacted>",
            self.base_url,
            query,
            SEARCH_LANGUAGE
        );

        // The request URL carries the token; keep it out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::NewsApi(format!(
                "Search for {:?} failed: {} - {}",
                query, status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url()))?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let total = parsed.total_articles;
        let articles = parsed.into_articles();
        tracing::debug!(
            "Received {} articles (service reports {:?} total)",
            articles.len(),
            total
        );

        Ok(articles)
    }

    fn name(&self) -> &str {
        "GNews"
    }
}
