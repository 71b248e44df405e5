//! Mock catalog transport for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{
    decode_form, CatalogError, CatalogTransport, TransportResponse, DETAIL_PATH, SEARCH_PATH,
};
use crate::provider::IdentifierKind;

/// Which endpoint a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Detail,
    Other,
}

/// A recorded request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub kind: RequestKind,
    pub fields: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Decoded value of a form field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn detail_target(&self) -> Option<(IdentifierKind, String)> {
        IdentifierKind::FALLBACK_ORDER
            .iter()
            .find_map(|kind| self.field(kind.param_name()).map(|id| (*kind, id.to_string())))
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(TransportResponse),
    Fail(String),
}

impl Scripted {
    fn into_result(self) -> Result<TransportResponse, CatalogError> {
        match self {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(message) => Err(CatalogError::Transport(message)),
        }
    }
}

/// Mock implementation of the CatalogTransport trait.
///
/// Provides controllable behavior for testing:
/// - Scripted search and per-identifier detail responses
/// - Transport failures
/// - Per-identifier latency, to exercise out-of-order completion
/// - Request recording for assertions
///
/// Unscripted detail lookups answer `{"result":"error"}`; an unscripted
/// search answers with no books.
#[derive(Debug)]
pub struct MockTransport {
    search: RwLock<Scripted>,
    details: RwLock<HashMap<(IdentifierKind, String), Scripted>>,
    delays: RwLock<HashMap<String, Duration>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a new mock transport with no scripted responses.
    pub fn new() -> Self {
        Self {
            search: RwLock::new(Scripted::Respond(TransportResponse::ok(r#"{"books":[]}"#))),
            details: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    // =========================================================================
    // Search Configuration
    // =========================================================================

    /// Answer searches with a 200 and this body.
    pub async fn set_search(&self, body: impl Into<String>) {
        *self.search.write().await = Scripted::Respond(TransportResponse::ok(body));
    }

    /// Answer searches with an arbitrary status and body.
    pub async fn set_search_raw(&self, status: u16, body: impl Into<String>) {
        *self.search.write().await = Scripted::Respond(TransportResponse {
            status,
            body: body.into(),
        });
    }

    /// Fail searches at the transport level.
    pub async fn fail_search(&self, message: &str) {
        *self.search.write().await = Scripted::Fail(message.to_string());
    }

    // =========================================================================
    // Detail Configuration
    // =========================================================================

    /// Answer detail lookups of `id` under `kind` with a 200 and this body.
    pub async fn set_detail(&self, kind: IdentifierKind, id: &str, body: impl Into<String>) {
        self.details.write().await.insert(
            (kind, id.to_string()),
            Scripted::Respond(TransportResponse::ok(body)),
        );
    }

    /// Answer detail lookups of `id` under `kind` with any status and body.
    pub async fn set_detail_raw(
        &self,
        kind: IdentifierKind,
        id: &str,
        status: u16,
        body: impl Into<String>,
    ) {
        self.details.write().await.insert(
            (kind, id.to_string()),
            Scripted::Respond(TransportResponse {
                status,
                body: body.into(),
            }),
        );
    }

    /// Fail every detail lookup of `id` at the transport level.
    pub async fn fail_detail(&self, id: &str) {
        let mut details = self.details.write().await;
        for kind in IdentifierKind::FALLBACK_ORDER {
            details.insert(
                (kind, id.to_string()),
                Scripted::Fail(format!("connection refused for {}", id)),
            );
        }
    }

    /// Delay every detail response for `id`.
    pub async fn set_detail_delay(&self, id: &str, delay: Duration) {
        self.delays.write().await.insert(id.to_string(), delay);
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn search_requests(&self) -> Vec<RecordedRequest> {
        self.requests_of(RequestKind::Search).await
    }

    pub async fn detail_requests(&self) -> Vec<RecordedRequest> {
        self.requests_of(RequestKind::Detail).await
    }

    /// Get the number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    async fn requests_of(&self, kind: RequestKind) -> Vec<RecordedRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogTransport for MockTransport {
    async fn post_form(
        &self,
        url: &str,
        body: String,
    ) -> Result<TransportResponse, CatalogError> {
        let kind = if url.ends_with(SEARCH_PATH) {
            RequestKind::Search
        } else if url.ends_with(DETAIL_PATH) {
            RequestKind::Detail
        } else {
            RequestKind::Other
        };
        let request = RecordedRequest {
            url: url.to_string(),
            kind,
            fields: decode_form(&body),
        };
        self.requests.write().await.push(request.clone());

        match kind {
            RequestKind::Search => self.search.read().await.clone().into_result(),
            RequestKind::Detail => {
                let Some(target) = request.detail_target() else {
                    return Ok(TransportResponse {
                        status: 400,
                        body: "missing identifier".to_string(),
                    });
                };

                let delay = self.delays.read().await.get(&target.1).copied();
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }

                match self.details.read().await.get(&target).cloned() {
                    Some(scripted) => scripted.into_result(),
                    None => Ok(TransportResponse::ok(r#"{"result":"error"}"#)),
                }
            }
            RequestKind::Other => Ok(TransportResponse {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}
