//! Search, fan out detail lookups, format, cache.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{DetailFetcher, NormalizedQuery};
use crate::cache::{CacheKey, InMemorySearchCache, SearchCache};
use crate::catalog::{
    CatalogError, CatalogTransport, HttpTransport, SearchHit, SearchResponse,
};
use crate::config::{CatalogConfig, Config};
use crate::metadata::{MetadataFormatter, NormalizedMetadata, SearchResultSet};
use crate::metrics::{MATCHES_DROPPED_TOTAL, SEARCHES_TOTAL};

/// Storytel metadata provider.
///
/// `search` never fails: every error degrades to fewer (or zero) matches.
/// Concurrent searches for the same key are not deduplicated; each one
/// hits the catalog and writes the cache.
pub struct StorytelProvider {
    transport: Arc<dyn CatalogTransport>,
    cache: Arc<dyn SearchCache>,
    fetcher: DetailFetcher,
    search_url: String,
    max_results: usize,
}

impl StorytelProvider {
    pub fn new(
        transport: Arc<dyn CatalogTransport>,
        cache: Arc<dyn SearchCache>,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            fetcher: DetailFetcher::new(transport.clone(), config.detail_url()),
            transport,
            cache,
            search_url: config.search_url(),
            max_results: config.max_results,
        }
    }

    /// Provider over HTTP with an in-memory cache, both built from config.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let transport = Arc::new(HttpTransport::new(&config.catalog)?);
        let cache = Arc::new(InMemorySearchCache::new(Duration::from_secs(
            config.cache.ttl_secs,
        )));
        Ok(Self::new(transport, cache, &config.catalog))
    }

    /// Search the catalog.
    ///
    /// The author only takes part in the cache key; the catalog search
    /// itself is by query alone.
    pub async fn search(
        &self,
        query: &str,
        author: Option<&str>,
        locale: &str,
    ) -> SearchResultSet {
        let query = NormalizedQuery::parse(query);
        if query.is_empty() {
            debug!("Empty query, skipping catalog search");
            return SearchResultSet::default();
        }

        let key = CacheKey::new(query.formatted(), author, locale);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(query = %key.query, locale = locale, "Search cache hit");
            SEARCHES_TOTAL.with_label_values(&["cache_hit"]).inc();
            return cached;
        }

        match self.fetch_matches(&query, locale).await {
            Ok(matches) => {
                info!(
                    query = %key.query,
                    author = ?author,
                    locale = locale,
                    matches = matches.len(),
                    "Catalog search complete"
                );
                SEARCHES_TOTAL.with_label_values(&["fetched"]).inc();

                let results = SearchResultSet::new(matches);
                self.cache.set(key, results.clone()).await;
                results
            }
            Err(e) => {
                warn!(query = %key.query, locale = locale, error = %e, "Catalog search failed");
                SEARCHES_TOTAL.with_label_values(&["failed"]).inc();
                SearchResultSet::default()
            }
        }
    }

    async fn fetch_matches(
        &self,
        query: &NormalizedQuery,
        locale: &str,
    ) -> Result<Vec<NormalizedMetadata>, CatalogError> {
        let body = format!(
            "q={}&request_locale={}",
            query.form_value(),
            urlencoding::encode(locale)
        );
        let response = self.transport.post_form(&self.search_url, body).await?;

        let entries = match serde_json::from_str::<SearchResponse>(&response.body) {
            Ok(parsed) => parsed.books,
            Err(e) => {
                warn!(
                    status = response.status,
                    error = %e,
                    "Undecodable search response, treating as no results"
                );
                Vec::new()
            }
        };

        debug!(
            hits = entries.len(),
            limit = self.max_results,
            "Resolving search candidates"
        );

        let formatter = MetadataFormatter::for_locale(locale);
        let lookups = entries
            .into_iter()
            .take(self.max_results)
            .map(|entry| self.resolve(entry, &formatter, locale));

        // join_all yields results in input order, whatever order they finish in.
        let resolved = join_all(lookups).await;

        Ok(resolved.into_iter().flatten().collect())
    }

    /// Turn one search hit into metadata, or `None` if it has to be dropped.
    async fn resolve(
        &self,
        entry: serde_json::Value,
        formatter: &MetadataFormatter<'_>,
        locale: &str,
    ) -> Option<NormalizedMetadata> {
        let hit = match SearchHit::from_entry(entry) {
            Ok(hit) => hit,
            Err(e) => {
                debug!(error = %e, "Undecodable search hit");
                MATCHES_DROPPED_TOTAL
                    .with_label_values(&["undecodable"])
                    .inc();
                return None;
            }
        };

        let Some(id) = hit.id() else {
            debug!("Search hit without identifier");
            MATCHES_DROPPED_TOTAL
                .with_label_values(&["missing_id"])
                .inc();
            return None;
        };

        let record = match self.fetcher.fetch(id, locale).await {
            Ok(record) => record,
            Err(e) => {
                debug!(id = id, error = %e, "Dropping candidate");
                MATCHES_DROPPED_TOTAL
                    .with_label_values(&["fetch_failed"])
                    .inc();
                return None;
            }
        };

        match formatter.format(&record) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                debug!(id = id, error = %e, "Dropping candidate");
                MATCHES_DROPPED_TOTAL
                    .with_label_values(&["not_publishable"])
                    .inc();
                None
            }
        }
    }
}
