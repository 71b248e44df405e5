//! Title normalization for catalog records.
//!
//! Raw catalog titles mix the book title with series markers, volume
//! numbers and edition annotations in a locale-specific way. This module
//! holds the marker catalog and the normalizer that applies it.

mod normalizer;
mod patterns;

pub use normalizer::{NormalizedTitle, TitleNormalizer};
pub use patterns::{PatternCatalog, TitlePattern, GENERIC_LOCALE};
