use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::models::AnalysisRun;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    credential: String,
    query: String,
}

impl CacheKey {
    pub fn new(credential: &str, query: &str) -> Self {
        Self {
            credential: credential.to_string(),
            query: normalize_query(query),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

struct CacheEntry {
    run: AnalysisRun,
    stored_at: Instant,
}

/// Whole-result cache: one stored run per (credential, query), dropped once
/// it is older than the TTL. Expiry is the only invalidation.
#[derive(Clone)]
pub struct ResultCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<AnalysisRun> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => return Some(entry.run.clone()),
            Some(_) => {}
            None => return None,
        }

        tracing::debug!("Cached result for {:?} expired", key.query());
        entries.remove(key);
        None
    }

    /// Stores a run and drops every entry that has outlived the TTL.
    pub async fn insert(&self, key: CacheKey, run: AnalysisRun) {
        let mut entries = self.entries.lock().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            CacheEntry {
                run,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_query() {
        assert_eq!(CacheKey::new("k", "  rust "), CacheKey::new("k", "rust"));
        assert_ne!(CacheKey::new("k", "rust"), CacheKey::new("other", "rust"));
        assert_ne!(CacheKey::new("k", "rust"), CacheKey::new("k", "Rust"));
        assert_eq!(CacheKey::new("k", "  ").query(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_served_within_ttl() {
        let cache = ResultCache::new(Duration::from_secs(600));
        let key = CacheKey::new("k", "rust");
        cache.insert(key.clone(), AnalysisRun::analyzed("rust", Vec::new())).await;

        tokio::time::advance(Duration::from_secs(599)).await;
        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit.query, "rust");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResultCache::new(Duration::from_secs(600));
        let key = CacheKey::new("k", "rust");
        cache.insert(key.clone(), AnalysisRun::analyzed("rust", Vec::new())).await;

        tokio::time::advance(Duration::from_secs(600)).await;
        assert!(cache.get(&key).await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_miss_for_unknown_key() {
        let cache = ResultCache::new(Duration::from_secs(600));
        cache.insert(CacheKey::new("k", "rust"), AnalysisRun::analyzed("rust", Vec::new())).await;
        assert!(cache.get(&CacheKey::new("k", "go")).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_evicts_expired_entries() {
        let cache = ResultCache::new(Duration::from_secs(600));
        for topic in ["rust", "go", "zig"] {
            cache.insert(CacheKey::new("k", topic), AnalysisRun::analyzed(topic, Vec::new())).await;
        }
        assert_eq!(cache.len().await, 3);

        tokio::time::advance(Duration::from_secs(300)).await;
        cache.insert(CacheKey::new("k", "c"), AnalysisRun::analyzed("c", Vec::new())).await;
        assert_eq!(cache.len().await, 4);

        tokio::time::advance(Duration::from_secs(300)).await;
        cache.insert(CacheKey::new("k", "swift"), AnalysisRun::analyzed("swift", Vec::new())).await;
        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&CacheKey::new("k", "c")).await.is_some());
        assert!(cache.get(&CacheKey::new("k", "rust")).await.is_none());
    }
}
