//! Wire types for the Storytel catalog API.

use serde::{Deserialize, Deserializer, Serialize};

/// Value the detail endpoint reports in `result` when the lookup worked.
pub const RESULT_SUCCESS: &str = "success";

/// Response of the search endpoint.
///
/// Entries stay raw JSON so that one malformed entry only costs that
/// entry; decode each with [`SearchHit::from_entry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<serde_json::Value>,
}

/// One search result, in relevance order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(default)]
    pub book: Option<SearchBook>,
}

impl SearchHit {
    pub fn from_entry(entry: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(entry)
    }

    /// The catalog identifier, if the hit carries a non-empty one.
    pub fn id(&self) -> Option<&str> {
        self.book
            .as_ref()
            .and_then(|b| b.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchBook {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

/// Response of the detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetailResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub slb: Option<RawCatalogRecord>,
}

impl DetailResponse {
    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some(RESULT_SUCCESS)
    }

    /// The record, only when the response reports success.
    pub fn into_record(self) -> Option<RawCatalogRecord> {
        if self.is_success() {
            self.slb
        } else {
            None
        }
    }
}

/// One catalog record: the book plus whichever editions exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCatalogRecord {
    #[serde(default)]
    pub book: Option<CatalogBook>,
    #[serde(default, rename = "abook")]
    pub audiobook_edition: Option<AudiobookEdition>,
    #[serde(default, rename = "ebook")]
    pub ebook_edition: Option<EbookEdition>,
}

impl RawCatalogRecord {
    /// A record can only be published with a book and at least one edition.
    pub fn is_publishable(&self) -> bool {
        self.book.is_some()
            && (self.audiobook_edition.is_some() || self.ebook_edition.is_some())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBook {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub authors_as_string: Option<String>,
    #[serde(default)]
    pub language: Option<CatalogLanguage>,
    #[serde(default)]
    pub category: Option<CatalogCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<CatalogSeries>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub series_order: Option<String>,
    #[serde(default)]
    pub large_cover: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLanguage {
    #[serde(default)]
    pub iso_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogCategory {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSeries {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogPublisher {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudiobookEdition {
    /// Running time in milliseconds.
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub narrator_as_string: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publisher: Option<CatalogPublisher>,
    #[serde(default, rename = "releaseDateFormat")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EbookEdition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publisher: Option<CatalogPublisher>,
    #[serde(default, rename = "releaseDateFormat")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub isbn: Option<String>,
}

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The catalog sends identifiers and series positions as either JSON
/// strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_ids() {
        let json = r#"{"books":[{"book":{"id":123}},{"book":{"id":"abc"}},{"book":{}},{}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let hits: Vec<SearchHit> = response
            .books
            .into_iter()
            .map(|entry| SearchHit::from_entry(entry).unwrap())
            .collect();
        let ids: Vec<Option<&str>> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec![Some("123"), Some("abc"), None, None]);
    }

    #[test]
    fn test_malformed_search_entries_fail_individually() {
        let json = r#"{"books":[{"book":{"id":"1"}},null,{"book":"x"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let decoded: Vec<bool> = response
            .books
            .into_iter()
            .map(|entry| SearchHit::from_entry(entry).is_ok())
            .collect();
        assert_eq!(decoded, vec![true, false, false]);
    }

    #[test]
    fn test_null_books_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"books":null}"#).unwrap();
        assert!(response.books.is_empty());
    }

    #[test]
    fn test_null_series_decodes_as_no_series() {
        let json = r#"{
            "result": "success",
            "slb": {
                "book": {"name": "Dune", "series": null, "seriesOrder": null},
                "abook": {"length": 60000}
            }
        }"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();

        let record = response.into_record().unwrap();
        let book = record.book.unwrap();
        assert!(book.series.is_empty());
        assert!(book.series_order.is_none());
    }

    #[test]
    fn test_search_response_without_books() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.books.is_empty());
    }

    #[test]
    fn test_detail_response_success() {
        let json = r#"{
            "result": "success",
            "slb": {
                "book": {
                    "name": "Caliban's War",
                    "authorsAsString": "James S. A. Corey",
                    "language": {"isoValue": "en"},
                    "category": {"title": "Sci-Fi"},
                    "series": [{"name": "The Expanse"}],
                    "seriesOrder": 2,
                    "largeCover": "/images/320x320/0001.jpg"
                },
                "abook": {
                    "length": 7200000,
                    "narratorAsString": "Jefferson Mays",
                    "publisher": {"name": "Hachette"},
                    "releaseDateFormat": "2012-06-26",
                    "isbn": "9781478953203"
                }
            }
        }"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());

        let record = response.into_record().unwrap();
        let book = record.book.as_ref().unwrap();
        assert_eq!(book.series_order.as_deref(), Some("2"));
        assert_eq!(book.series[0].name.as_deref(), Some("The Expanse"));

        let abook = record.audiobook_edition.as_ref().unwrap();
        assert_eq!(abook.length, Some(7_200_000));
        assert_eq!(abook.release_date.as_deref(), Some("2012-06-26"));
        assert!(record.ebook_edition.is_none());
        assert!(record.is_publishable());
    }

    #[test]
    fn test_detail_response_failure_has_no_record() {
        let json = r#"{"result":"error","slb":{"book":{"name":"x"}}}"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert!(response.into_record().is_none());
    }

    #[test]
    fn test_record_without_edition_is_not_publishable() {
        let record = RawCatalogRecord {
            book: Some(CatalogBook::default()),
            audiobook_edition: None,
            ebook_edition: None,
        };
        assert!(!record.is_publishable());

        let record = RawCatalogRecord {
            book: None,
            audiobook_edition: Some(AudiobookEdition::default()),
            ebook_edition: None,
        };
        assert!(!record.is_publishable());
    }
}
