//! Search result caching.
//!
//! The provider owns a [`SearchCache`] instance instead of a process-wide
//! map, so independent providers (and tests) never share entries.

mod memory;

pub use memory::InMemorySearchCache;

use async_trait::async_trait;

use crate::metadata::SearchResultSet;

/// Identifies one memoized search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub author: Option<String>,
    pub locale: String,
}

impl CacheKey {
    pub fn new(query: impl Into<String>, author: Option<&str>, locale: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            author: author.map(str::to_string),
            locale: locale.into(),
        }
    }
}

/// Key/value store for search results with expiry.
///
/// Writes for the same key are last-writer-wins.
#[async_trait]
pub trait SearchCache: Send + Sync {
    /// A live entry for `key`, or `None` if missing or expired.
    async fn get(&self, key: &CacheKey) -> Option<SearchResultSet>;

    /// Store `value` under `key`, replacing any previous entry.
    async fn set(&self, key: CacheKey, value: SearchResultSet);
}
