pub mod pipeline;

pub use pipeline::SentimentPipeline;
