use std::sync::Arc;

use crate::cache::{CacheKey, ResultCache};
use crate::config::PipelineConfig;
use crate::models::AnalysisRun;
use crate::news::NewsSource;
use crate::sentiment::{Classifier, PolarityScorer};

/// Fetch, classify and cache one topic search per call.
pub struct SentimentPipeline {
    news: Arc<dyn NewsSource>,
    classifier: Classifier,
    cache: ResultCache,
}

impl SentimentPipeline {
    pub fn new(
        news: impl NewsSource + 'static,
        scorer: impl PolarityScorer + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self::with_cache(news, scorer, ResultCache::new(config.cache_ttl))
    }

    pub fn with_cache(
        news: impl NewsSource + 'static,
        scorer: impl PolarityScorer + 'static,
        cache: ResultCache,
    ) -> Self {
        Self {
            news: Arc::new(news),
            classifier: Classifier::new(scorer),
            cache,
        }
    }

    /// Never fails: fetch problems come back as a run with an empty result and
    /// a `FetchFailed` diagnostic. Every run is cached, diagnostic included,
    /// so a hit inside the TTL replays it without a request.
    pub async fn run(&self, credential: &str, query: &str) -> AnalysisRun {
        let key = CacheKey::new(credential, query);

        if let Some(mut cached) = self.cache.get(&key).await {
            tracing::info!("Serving cached result for {:?}", key.query());
            cached.from_cache = true;
            return cached;
        }

        let run = self.fetch_and_analyze(credential, key.query()).await;
        self.cache.insert(key, run.clone()).await;
        tracing::debug!("{} results cached", self.cache.len().await);

        run
    }

    async fn fetch_and_analyze(&self, credential: &str, query: &str) -> AnalysisRun {
        // Step 1: Search
        tracing::info!("Searching {} for: {:?}", self.news.name(), query);
        let raw_articles = match self.news.search(query, credential).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Error fetching news: {}", e);
                return AnalysisRun::failed(query, e.to_string());
            }
        };

        if raw_articles.is_empty() {
            tracing::warn!("No articles found for {:?}", query);
            return AnalysisRun::analyzed(query, Vec::new());
        }

        // Step 2: Classify in response order
        let analyzed = self.classifier.classify_all(raw_articles);
        if analyzed.is_empty() {
            tracing::warn!("No usable articles for {:?}", query);
        } else {
            tracing::info!(
                "Analyzed {} articles with the {} scorer",
                analyzed.len(),
                self.classifier.scorer_name()
            );
        }

        AnalysisRun::analyzed(query, analyzed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Duration;

    use crate::error::{Error, Result};
    use crate::models::{Diagnostic, RawArticle, SentimentLabel};
    use crate::news::GNewsClient;
    use crate::sentiment::LexiconScorer;

    enum Reply {
        Articles(Vec<RawArticle>),
        Fail(&'static str),
    }

    struct StubSource {
        reply: Reply,
        requests: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn new(reply: Reply) -> (Self, Arc<AtomicUsize>) {
            let requests = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply,
                    requests: requests.clone(),
                },
                requests,
            )
        }
    }

    #[async_trait]
    impl NewsSource for StubSource {
        async fn search(&self, _query: &str, _credential: &str) -> Result<Vec<RawArticle>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Articles(articles) => Ok(articles.clone()),
                Reply::Fail(msg) => Err(Error::NewsApi(msg.to_string())),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn raw(title: Option<&str>, description: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(String::from),
            description: description.map(String::from),
            url: Some("https://example.com/a".to_string()),
            ..Default::default()
        }
    }

    fn sample_articles() -> Vec<RawArticle> {
        vec![
            raw(Some("Great results"), Some("excellent quarter")),
            raw(None, Some("no title here")),
            raw(Some("Markets steady"), None),
            raw(Some("Terrible storm"), Some("deadly flooding")),
        ]
    }

    fn pipeline(reply: Reply) -> (SentimentPipeline, Arc<AtomicUsize>) {
        let (source, requests) = StubSource::new(reply);
        let pipeline =
            SentimentPipeline::new(source, LexiconScorer::new(), PipelineConfig::default());
        (pipeline, requests)
    }

    #[tokio::test]
    async fn test_run_classifies_in_order() {
        let (pipeline, _) = pipeline(Reply::Articles(sample_articles()));

        let run = pipeline.run("key", "weather").await;
        assert!(run.diagnostic.is_none());
        assert!(!run.from_cache);

        let titles: Vec<_> = run.articles.iter().map(|a| a.article.title.as_str()).collect();
        assert_eq!(titles, vec!["Great results", "Markets steady", "Terrible storm"]);

        let labels: Vec<_> = run.articles.iter().map(|a| a.sentiment_label).collect();
        assert_eq!(
            labels,
            vec![
                SentimentLabel::Positive,
                SentimentLabel::Neutral,
                SentimentLabel::Negative
            ]
        );

        let counts = run.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.neutral, 1);
        assert_eq!(counts.negative, 1);
    }

    #[tokio::test]
    async fn test_repeated_call_is_served_from_cache() {
        let (pipeline, requests) = pipeline(Reply::Articles(sample_articles()));

        let first = pipeline.run("key", "weather").await;
        let second = pipeline.run("key", "weather").await;

        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(second.from_cache);
        assert_eq!(first.articles, second.articles);
    }

    #[tokio::test]
    async fn test_whitespace_variants_share_an_entry() {
        let (pipeline, requests) = pipeline(Reply::Articles(sample_articles()));

        pipeline.run("key", "weather").await;
        let run = pipeline.run("key", "  weather ").await;

        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(run.query, "weather");
    }

    #[tokio::test]
    async fn test_different_inputs_issue_new_requests() {
        let (pipeline, requests) = pipeline(Reply::Articles(sample_articles()));

        pipeline.run("key", "weather").await;
        pipeline.run("key", "markets").await;
        pipeline.run("other-key", "weather").await;

        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched() {
        let (pipeline, requests) = pipeline(Reply::Articles(sample_articles()));

        pipeline.run("key", "weather").await;
        tokio::time::advance(Duration::from_secs(300)).await;
        pipeline.run("key", "weather").await;
        assert_eq!(requests.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(301)).await;
        let run = pipeline.run("key", "weather").await;
        assert_eq!(requests.load(Ordering::SeqCst), 2);
        assert!(!run.from_cache);
    }

    #[tokio::test]
    async fn test_empty_response_takes_no_results_path() {
        let (pipeline, requests) = pipeline(Reply::Articles(Vec::new()));

        let run = pipeline.run("key", "nothing").await;
        assert!(run.is_empty());
        assert_eq!(run.diagnostic, Some(Diagnostic::NoArticles));
        assert!(!matches!(run.diagnostic, Some(Diagnostic::FetchFailed(_))));

        pipeline.run("key", "nothing").await;
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_untitled_articles_only_takes_no_results_path() {
        let (pipeline, _) = pipeline(Reply::Articles(vec![
            raw(None, Some("a")),
            raw(Some(""), Some("b")),
        ]));

        let run = pipeline.run("key", "untitled").await;
        assert!(run.is_empty());
        assert_eq!(run.diagnostic, Some(Diagnostic::NoArticles));
    }

    #[tokio::test]
    async fn test_fetch_failure_takes_error_path_and_is_cached() {
        let (pipeline, requests) = pipeline(Reply::Fail("connection refused"));

        let run = pipeline.run("key", "weather").await;
        assert!(run.is_empty());
        match run.diagnostic {
            Some(Diagnostic::FetchFailed(detail)) => assert!(detail.contains("connection refused")),
            other => panic!("unexpected diagnostic: {:?}", other),
        }

        let again = pipeline.run("key", "weather").await;
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(again.from_cache);
        assert!(again.is_empty());
        assert!(matches!(again.diagnostic, Some(Diagnostic::FetchFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_failure_is_retried_after_expiry() {
        let (pipeline, requests) = pipeline(Reply::Fail("503 Service Unavailable"));

        pipeline.run("key", "weather").await;
        tokio::time::advance(Duration::from_secs(600)).await;
        pipeline.run("key", "weather").await;

        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_connection_error_from_http_client() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GNewsClient::with_base_url(format!("http://{}", addr)).unwrap();
        let pipeline =
            SentimentPipeline::new(client, LexiconScorer::new(), PipelineConfig::default());

        let run = pipeline.run("SUPERSECRET", "weather").await;
        assert!(run.is_empty());
        match run.diagnostic {
            Some(Diagnostic::FetchFailed(detail)) => assert!(!detail.contains("SUPERSECRET")),
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }
}
