pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod sentiment;
pub mod cache;
pub mod analysis;
pub mod report;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use news::{GNewsClient, NewsSource};
pub use sentiment::{LexiconScorer, PolarityScorer};
pub use cache::ResultCache;
pub use analysis::SentimentPipeline;
pub use report::Dashboard;
