//! Catalog record to public metadata mapping.

mod formatter;
mod types;

pub use formatter::{split_genre, upgrade_cover_url, MetadataFormatter};
pub use types::*;
