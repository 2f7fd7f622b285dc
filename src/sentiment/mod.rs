pub mod scorer;
pub mod lexicon;
pub mod classifier;

pub use scorer::PolarityScorer;
pub use lexicon::LexiconScorer;
pub use classifier::{classify, round_score, Classifier};
