//! Search orchestration against the Storytel catalog.
//!
//! [`StorytelProvider`] runs one search: cache lookup, catalog search,
//! concurrent per-hit detail lookups through [`DetailFetcher`], formatting,
//! and the cache write.

mod fetcher;
mod orchestrator;
mod query;

pub use fetcher::{DetailFetcher, IdentifierKind};
pub use orchestrator::StorytelProvider;
pub use query::NormalizedQuery;
