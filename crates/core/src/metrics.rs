//! Prometheus metrics for the provider.
//!
//! This module provides metrics for:
//! - Searches (cache hits, fetched, failed)
//! - Detail lookups (which identifier kind worked)
//! - Candidates dropped from a result set

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts, Registry};

/// Searches by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("storytel_searches_total", "Total provider searches"),
        &["outcome"], // "cache_hit", "fetched", "failed"
    )
    .unwrap()
});

/// Detail lookups by outcome.
pub static DETAIL_FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "storytel_detail_fetches_total",
            "Total catalog detail lookups",
        ),
        &["outcome"], // "book_id", "consumable_id", "unavailable", "error"
    )
    .unwrap()
});

/// Search candidates left out of a result set.
pub static MATCHES_DROPPED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "storytel_matches_dropped_total",
            "Search candidates dropped from results",
        ),
        &["reason"], // "undecodable", "missing_id", "fetch_failed", "not_publishable"
    )
    .unwrap()
});

/// Register all provider metrics with a registry.
pub fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(SEARCHES_TOTAL.clone()))
        .expect("Failed to register SEARCHES_TOTAL");
    registry
        .register(Box::new(DETAIL_FETCHES_TOTAL.clone()))
        .expect("Failed to register DETAIL_FETCHES_TOTAL");
    registry
        .register(Box::new(MATCHES_DROPPED_TOTAL.clone()))
        .expect("Failed to register MATCHES_DROPPED_TOTAL");
}
