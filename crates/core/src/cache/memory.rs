//! In-memory TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheKey, SearchCache};
use crate::metadata::SearchResultSet;

struct CacheEntry {
    value: SearchResultSet,
    stored_at: Instant,
}

/// [`SearchCache`] backed by a `HashMap`. Entries expire `ttl` after
/// they were written.
pub struct InMemorySearchCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl InMemorySearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop expired entries. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl SearchCache for InMemorySearchCache {
    async fn get(&self, key: &CacheKey) -> Option<SearchResultSet> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Expired entries are evicted on every write.
    async fn set(&self, key: CacheKey, value: SearchResultSet) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NormalizedMetadata;

    fn results(title: &str) -> SearchResultSet {
        SearchResultSet::new(vec![NormalizedMetadata {
            title: title.to_string(),
            ..NormalizedMetadata::default()
        }])
    }

    #[tokio::test]
    async fn test_get_after_set() {
        let cache = InMemorySearchCache::new(Duration::from_secs(600));
        let key = CacheKey::new("dune", None, "en");

        assert!(cache.get(&key).await.is_none());
        cache.set(key.clone(), results("Dune")).await;
        assert_eq!(cache.get(&key).await, Some(results("Dune")));
    }

    #[tokio::test]
    async fn test_key_includes_author_and_locale() {
        let cache = InMemorySearchCache::new(Duration::from_secs(600));
        cache
            .set(CacheKey::new("dune", Some("Herbert"), "en"), results("Dune"))
            .await;

        assert!(cache.get(&CacheKey::new("dune", None, "en")).await.is_none());
        assert!(cache
            .get(&CacheKey::new("dune", Some("Herbert"), "sv"))
            .await
            .is_none());
        assert!(cache
            .get(&CacheKey::new("dune", Some("Herbert"), "en"))
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = InMemorySearchCache::new(Duration::from_secs(600));
        let key = CacheKey::new("dune", None, "en");

        cache.set(key.clone(), results("first")).await;
        cache.set(key.clone(), results("second")).await;

        assert_eq!(cache.get(&key).await, Some(results("second")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_evicts_expired_entries() {
        let cache = InMemorySearchCache::new(Duration::from_millis(20));
        let stale = CacheKey::new("dune", None, "en");
        let fresh = CacheKey::new("dune messiah", None, "en");

        cache.set(stale.clone(), results("Dune")).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.set(fresh.clone(), results("Dune Messiah")).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&stale).await.is_none());
        assert!(cache.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = InMemorySearchCache::new(Duration::from_millis(20));
        let key = CacheKey::new("dune", None, "en");

        cache.set(key.clone(), results("Dune")).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get(&key).await.is_none());
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }
}
