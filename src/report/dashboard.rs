use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AnalysisRun, AnalyzedArticle, Diagnostic, SentimentCounts, SentimentLabel};

pub const FAILURE_MESSAGE: &str = "Could not retrieve or analyze news. Check your API key or query.";

#[derive(Debug, Clone, Serialize)]
pub struct ChartBar {
    pub label: SentimentLabel,
    pub count: usize,
    pub color: String,
}

/// Everything a renderer needs for one run: counters, chart and table rows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub query: String,
    pub status: String,
    pub diagnostic: Option<Diagnostic>,
    pub counts: SentimentCounts,
    pub chart_title: String,
    pub chart: Vec<ChartBar>,
    pub articles: Vec<AnalyzedArticle>,
    pub analyzed_at: DateTime<Utc>,
    pub from_cache: bool,
}

impl Dashboard {
    pub fn from_run(run: &AnalysisRun) -> Self {
        let counts = run.counts();

        let chart = SentimentLabel::ALL
            .iter()
            .map(|label| ChartBar {
                label: *label,
                count: counts.get(*label),
                color: label.color().to_string(),
            })
            .collect();

        let status = if run.is_empty() {
            FAILURE_MESSAGE.to_string()
        } else {
            format!(
                "Successfully analyzed {} articles for '{}'!",
                counts.total, run.query
            )
        };

        Self {
            query: run.query.clone(),
            status,
            diagnostic: run.diagnostic.clone(),
            counts,
            chart_title: format!("Sentiment for '{}'", run.query),
            chart,
            articles: run.articles.clone(),
            analyzed_at: run.analyzed_at,
            from_cache: run.from_cache,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.articles.is_empty()
    }

    pub fn max_bar(&self) -> usize {
        self.chart.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
