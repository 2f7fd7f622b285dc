use std::sync::Arc;

use crate::models::{AnalyzedArticle, Article, RawArticle, SentimentLabel};
use crate::sentiment::scorer::PolarityScorer;

/// Rounds to 3 decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Rounds a raw polarity and buckets the rounded value. No clamping.
pub fn classify(polarity: f64) -> (f64, SentimentLabel) {
    let score = round_score(polarity);
    (score, SentimentLabel::from_score(score))
}

pub struct Classifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl Classifier {
    pub fn new(scorer: impl PolarityScorer + 'static) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn classify_article(&self, article: Article) -> AnalyzedArticle {
        let polarity = self.scorer.polarity(&article.classification_text());
        let (sentiment_score, sentiment_label) = classify(polarity);

        AnalyzedArticle {
            article,
            sentiment_score,
            sentiment_label,
        }
    }

    /// Drops records without a title and classifies the rest, keeping the
    /// input order.
    pub fn classify_all(&self, raw_articles: Vec<RawArticle>) -> Vec<AnalyzedArticle> {
        let total = raw_articles.len();
        let analyzed: Vec<_> = raw_articles
            .into_iter()
            .filter_map(Article::from_raw)
            .map(|article| self.classify_article(article))
            .collect();

        if analyzed.len() < total {
            tracing::debug!("Skipped {} articles without a title", total - analyzed.len());
        }

        analyzed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Scores by exact text lookup, 0.0 otherwise.
    struct FixedScorer(HashMap<String, f64>);

    impl FixedScorer {
        fn new(pairs: &[(&str, f64)]) -> Self {
            Self(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
        }
    }

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, text: &str) -> f64 {
            self.0.get(text).copied().unwrap_or(0.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn raw(title: Option<&str>, description: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(String::from),
            description: description.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.123456), 0.123);
        assert_eq!(round_score(-0.98765), -0.988);
        assert_eq!(round_score(0.5), 0.5);
        assert_eq!(round_score(1.0 / 3.0), 0.333);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.1), (0.1, SentimentLabel::Neutral));
        assert_eq!(classify(-0.1), (-0.1, SentimentLabel::Neutral));
        assert_eq!(classify(0.1004), (0.1, SentimentLabel::Neutral));
        assert_eq!(classify(0.1006), (0.101, SentimentLabel::Positive));
        assert_eq!(classify(-0.2), (-0.2, SentimentLabel::Negative));
    }

    #[test]
    fn test_out_of_range_polarity_is_not_clamped() {
        assert_eq!(classify(1.7).0, 1.7);
        assert_eq!(classify(-2.25).0, -2.25);
    }

    #[test]
    fn test_classify_all_filters_and_preserves_order() {
        let classifier = Classifier::new(FixedScorer::new(&[
            ("Alpha up", 0.5),
            ("Beta", -0.4),
            ("Gamma steady", 0.05),
        ]));

        let input = vec![
            raw(Some("Alpha"), Some("up")),
            raw(None, Some("orphan description")),
            raw(Some("Beta"), None),
            raw(Some(""), Some("empty title")),
            raw(Some("Gamma"), Some("steady")),
        ];
        let expected_len = input
            .iter()
            .filter(|a| a.title.as_deref().map(|t| !t.is_empty()).unwrap_or(false))
            .count();

        let analyzed = classifier.classify_all(input);
        assert_eq!(analyzed.len(), expected_len);

        let titles: Vec<_> = analyzed.iter().map(|a| a.article.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

        let labels: Vec<_> = analyzed.iter().map(|a| a.sentiment_label).collect();
        assert_eq!(
            labels,
            vec![
                SentimentLabel::Positive,
                SentimentLabel::Negative,
                SentimentLabel::Neutral
            ]
        );
    }

    #[test]
    fn test_scores_are_rounded() {
        let classifier = Classifier::new(FixedScorer::new(&[("Precise", 0.4567891)]));
        let article = Article::from_raw(raw(Some("Precise"), None)).unwrap();
        let analyzed = classifier.classify_article(article);
        assert_eq!(analyzed.sentiment_score, 0.457);
    }
}
