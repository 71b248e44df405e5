use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

/// Storytel catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog base URL (default: https://www.storytel.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Locale used when the caller does not pick one
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Search hits resolved per query (default: 10)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Request timeout in seconds. Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_locale: default_locale(),
            max_results: default_max_results(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl CatalogConfig {
    pub fn search_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            crate::catalog::SEARCH_PATH
        )
    }

    pub fn detail_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            crate::catalog::DETAIL_PATH
        )
    }
}

fn default_base_url() -> String {
    "https://www.storytel.com".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_max_results() -> usize {
    10
}

/// Search result cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds (default: 600)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.max_results, 10);
        assert_eq!(config.catalog.default_locale, "en");
        assert_eq!(config.cache.ttl_secs, 600);
    }

    #[test]
    fn test_endpoint_urls_ignore_trailing_slash() {
        let config = CatalogConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.search_url(), "http://localhost:9000/api/search.action");
        assert_eq!(
            config.detail_url(),
            "http://localhost:9000/api/getBookInfoForContent.action"
        );
    }
}
