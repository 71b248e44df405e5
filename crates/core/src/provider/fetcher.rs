//! Catalog detail lookups with identifier fallback.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{
    encode_form, CatalogError, CatalogTransport, DetailResponse, RawCatalogRecord,
};
use crate::metrics::DETAIL_FETCHES_TOTAL;

/// Form parameter an identifier is sent under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    BookId,
    ConsumableId,
}

impl IdentifierKind {
    /// Kinds in the order they are tried.
    pub const FALLBACK_ORDER: [IdentifierKind; 2] =
        [IdentifierKind::BookId, IdentifierKind::ConsumableId];

    pub fn param_name(&self) -> &'static str {
        match self {
            IdentifierKind::BookId => "bookId",
            IdentifierKind::ConsumableId => "consumableId",
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            IdentifierKind::BookId => "book_id",
            IdentifierKind::ConsumableId => "consumable_id",
        }
    }
}

/// Fetches one catalog record by identifier.
pub struct DetailFetcher {
    transport: Arc<dyn CatalogTransport>,
    detail_url: String,
}

impl DetailFetcher {
    pub fn new(transport: Arc<dyn CatalogTransport>, detail_url: impl Into<String>) -> Self {
        Self {
            transport,
            detail_url: detail_url.into(),
        }
    }

    /// Fetch a record, trying `bookId` first and `consumableId` once after.
    ///
    /// Returns [`CatalogError::BookUnavailable`] when neither attempt reports
    /// success. Transport failures end the lookup immediately.
    pub async fn fetch(&self, id: &str, locale: &str) -> Result<RawCatalogRecord, CatalogError> {
        for kind in IdentifierKind::FALLBACK_ORDER {
            match self.attempt(id, kind, locale).await {
                Ok(Some(record)) => {
                    DETAIL_FETCHES_TOTAL
                        .with_label_values(&[kind.metric_label()])
                        .inc();
                    return Ok(record);
                }
                Ok(None) => {
                    debug!(id = id, kind = kind.param_name(), "Detail lookup unsuccessful");
                }
                Err(e) => {
                    DETAIL_FETCHES_TOTAL.with_label_values(&["error"]).inc();
                    return Err(e);
                }
            }
        }

        DETAIL_FETCHES_TOTAL
            .with_label_values(&["unavailable"])
            .inc();
        Err(CatalogError::BookUnavailable { id: id.to_string() })
    }

    /// One POST. `Ok(None)` means the catalog did not report success, which
    /// includes bodies that are not a detail response at all.
    async fn attempt(
        &self,
        id: &str,
        kind: IdentifierKind,
        locale: &str,
    ) -> Result<Option<RawCatalogRecord>, CatalogError> {
        let body = encode_form(&[(kind.param_name(), id), ("request_locale", locale)]);
        let response = self.transport.post_form(&self.detail_url, body).await?;

        match serde_json::from_str::<DetailResponse>(&response.body) {
            Ok(detail) => Ok(detail.into_record()),
            Err(e) => {
                debug!(
                    id = id,
                    status = response.status,
                    error = %e,
                    "Undecodable detail response"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockTransport};

    const DETAIL_URL: &str = "http://catalog.test/api/getBookInfoForContent.action";

    fn fetcher(transport: &Arc<MockTransport>) -> DetailFetcher {
        DetailFetcher::new(transport.clone(), DETAIL_URL)
    }

    #[tokio::test]
    async fn test_book_id_success() {
        let transport = Arc::new(MockTransport::new());
        transport
            .set_detail(
                IdentifierKind::BookId,
                "42",
                fixtures::audiobook_detail("Dune", "Frank Herbert"),
            )
            .await;

        let record = fetcher(&transport).fetch("42", "en").await.unwrap();

        assert_eq!(record.book.unwrap().name.as_deref(), Some("Dune"));
        let requests = transport.detail_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].field("bookId"), Some("42"));
        assert_eq!(requests[0].field("request_locale"), Some("en"));
    }

    #[tokio::test]
    async fn test_falls_back_to_consumable_id() {
        let transport = Arc::new(MockTransport::new());
        transport
            .set_detail(IdentifierKind::BookId, "42", fixtures::failed_detail())
            .await;
        transport
            .set_detail(
                IdentifierKind::ConsumableId,
                "42",
                fixtures::audiobook_detail("Dune", "Frank Herbert"),
            )
            .await;

        let record = fetcher(&transport).fetch("42", "en").await.unwrap();

        assert!(record.audiobook_edition.is_some());
        let requests = transport.detail_requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].field("bookId"), Some("42"));
        assert_eq!(requests[1].field("consumableId"), Some("42"));
    }

    #[tokio::test]
    async fn test_undecodable_body_falls_back() {
        let transport = Arc::new(MockTransport::new());
        transport
            .set_detail_raw(IdentifierKind::BookId, "42", 502, "<html>Bad gateway</html>")
            .await;
        transport
            .set_detail(
                IdentifierKind::ConsumableId,
                "42",
                fixtures::ebook_detail("Dune", "Frank Herbert"),
            )
            .await;

        let record = fetcher(&transport).fetch("42", "en").await.unwrap();
        assert!(record.ebook_edition.is_some());
    }

    #[tokio::test]
    async fn test_both_kinds_fail_is_unavailable() {
        let transport = Arc::new(MockTransport::new());

        let result = fetcher(&transport).fetch("404", "en").await;

        assert!(matches!(
            result,
            Err(CatalogError::BookUnavailable { ref id }) if id == "404"
        ));
        assert_eq!(transport.detail_requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let transport = Arc::new(MockTransport::new());
        transport.fail_detail("42").await;

        let result = fetcher(&transport).fetch("42", "en").await;

        assert!(matches!(result, Err(CatalogError::Transport(_))));
        assert_eq!(transport.detail_requests().await.len(), 1);
    }

    #[test]
    fn test_param_names() {
        assert_eq!(IdentifierKind::BookId.param_name(), "bookId");
        assert_eq!(IdentifierKind::ConsumableId.param_name(), "consumableId");
    }
}
