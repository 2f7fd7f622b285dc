pub mod result_cache;

pub use result_cache::{normalize_query, CacheKey, ResultCache};
