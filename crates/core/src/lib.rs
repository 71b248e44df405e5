pub mod cache;
pub mod catalog;
pub mod config;
pub mod metadata;
pub mod metrics;
pub mod provider;
pub mod testing;
pub mod titles;

pub use cache::{CacheKey, InMemorySearchCache, SearchCache};
pub use catalog::{
    AudiobookEdition, CatalogBook, CatalogError, CatalogTransport, EbookEdition, HttpTransport,
    RawCatalogRecord, TransportResponse,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CacheConfig, CatalogConfig, Config,
    ConfigError, ServerConfig,
};
pub use metadata::{
    split_genre, upgrade_cover_url, MetadataFormatter, NormalizedMetadata, SearchResultSet,
    SeriesInfo,
};
pub use provider::{DetailFetcher, IdentifierKind, NormalizedQuery, StorytelProvider};
pub use titles::{NormalizedTitle, PatternCatalog, TitleNormalizer, TitlePattern};
