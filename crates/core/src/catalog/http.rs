//! reqwest-backed catalog transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use super::{CatalogError, CatalogTransport, TransportResponse};
use crate::config::CatalogConfig;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Catalog transport over HTTP.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport. No request timeout is set unless configured.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        body: String,
    ) -> Result<TransportResponse, CatalogError> {
        debug!(url = url, "Catalog POST");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url = url, status = status, bytes = body.len(), "Catalog response");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_without_timeout() {
        let config = CatalogConfig::default();
        assert!(config.timeout_secs.is_none());
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn test_transport_builds_with_timeout_and_agent() {
        let config = CatalogConfig {
            timeout_secs: Some(5),
            user_agent: Some("storytel-test".to_string()),
            ..CatalogConfig::default()
        };
        assert!(HttpTransport::new(&config).is_ok());
    }
}
