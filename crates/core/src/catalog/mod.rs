//! Storytel catalog API access.
//!
//! The catalog is reached through the [`CatalogTransport`] seam: a form POST
//! that yields a status and a body. [`HttpTransport`] is the reqwest-backed
//! implementation; tests use `testing::MockTransport`.

mod http;
mod types;

pub use http::HttpTransport;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Path of the search endpoint, relative to the catalog base URL.
pub const SEARCH_PATH: &str = "/api/search.action";

/// Path of the detail endpoint, relative to the catalog base URL.
pub const DETAIL_PATH: &str = "/api/getBookInfoForContent.action";

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Transport failed for a reason other than reqwest.
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Neither identifier kind produced a successful lookup.
    #[error("Book unavailable: {id}")]
    BookUnavailable { id: String },

    /// The record has no book or no edition to publish.
    #[error("Record is not publishable: {0}")]
    NotPublishable(String),
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// fetch(url, body) -> response.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// POST an already encoded `application/x-www-form-urlencoded` body.
    ///
    /// Non-2xx statuses are returned as responses; only failures to get a
    /// response at all are errors.
    async fn post_form(&self, url: &str, body: String)
        -> Result<TransportResponse, CatalogError>;
}

/// Encode form fields. Values are percent-encoded as a whole.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a form body back into its fields. `+` decodes to a space.
pub fn decode_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        let body = encode_form(&[("bookId", "12 34"), ("request_locale", "de")]);
        assert_eq!(body, "bookId=12%2034&request_locale=de");
    }

    #[test]
    fn test_decode_form_plus_is_space() {
        let fields = decode_form("q=harry+potter&request_locale=en");
        assert_eq!(
            fields,
            vec![
                ("q".to_string(), "harry potter".to_string()),
                ("request_locale".to_string(), "en".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_form_percent_escapes() {
        let fields = decode_form("q=C%2B%2B+Primer");
        assert_eq!(fields[0].1, "C++ Primer");
    }
}
