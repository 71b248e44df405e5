//! Testing utilities: a scripted catalog transport and response fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use storytel_core::testing::{fixtures, MockTransport};
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.set_search(fixtures::search_response(&["42"])).await;
//! transport
//!     .set_detail(IdentifierKind::BookId, "42", fixtures::audiobook_detail("Dune", "Frank Herbert"))
//!     .await;
//!
//! let provider = StorytelProvider::new(transport.clone(), cache, &fixtures::catalog_config());
//! ```

mod mock_transport;

pub use mock_transport::{MockTransport, RecordedRequest, RequestKind};

/// Catalog JSON fixtures.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::config::CatalogConfig;

    /// Base URL that [`super::MockTransport`] tests point at.
    pub const TEST_BASE_URL: &str = "http://catalog.test";

    pub fn catalog_config() -> CatalogConfig {
        CatalogConfig {
            base_url: TEST_BASE_URL.to_string(),
            ..CatalogConfig::default()
        }
    }

    /// Search body listing the given ids in relevance order.
    pub fn search_response(ids: &[&str]) -> String {
        let books: Vec<Value> = ids.iter().map(|id| json!({"book": {"id": id}})).collect();
        json!({ "books": books }).to_string()
    }

    pub fn book(name: &str, author: &str) -> Value {
        json!({
            "name": name,
            "authorsAsString": author,
            "language": {"isoValue": "en"},
            "category": {"title": "Fantasy"},
            "largeCover": "/images/320x320/cover.jpg"
        })
    }

    pub fn audiobook_edition() -> Value {
        json!({
            "length": 36_000_000,
            "narratorAsString": "Narrator",
            "description": "Audiobook description.",
            "publisher": {"name": "Audio Publisher"},
            "releaseDateFormat": "2019-05-01",
            "isbn": "9780000000001"
        })
    }

    pub fn ebook_edition() -> Value {
        json!({
            "description": "Ebook description.",
            "publisher": {"name": "Ebook Publisher"},
            "releaseDateFormat": "2018-02-01",
            "isbn": "9780000000002"
        })
    }

    /// Successful detail body from explicit parts.
    pub fn detail(book: Value, abook: Option<Value>, ebook: Option<Value>) -> String {
        let mut slb = json!({ "book": book });
        if let Some(abook) = abook {
            slb["abook"] = abook;
        }
        if let Some(ebook) = ebook {
            slb["ebook"] = ebook;
        }
        json!({ "result": "success", "slb": slb }).to_string()
    }

    pub fn audiobook_detail(name: &str, author: &str) -> String {
        detail(book(name, author), Some(audiobook_edition()), None)
    }

    pub fn ebook_detail(name: &str, author: &str) -> String {
        detail(book(name, author), None, Some(ebook_edition()))
    }

    /// Detail body for a lookup the catalog rejected.
    pub fn failed_detail() -> String {
        json!({ "result": "error" }).to_string()
    }
}
