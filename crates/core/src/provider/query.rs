//! Search query normalization.

/// Token joining query words, read as a space by form decoding.
const QUERY_SEPARATOR: &str = "+";

/// A search query reduced to its words.
///
/// Anything after the first `:` is dropped and whitespace runs collapse to
/// one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    tokens: Vec<String>,
}

impl NormalizedQuery {
    pub fn parse(raw: &str) -> Self {
        let head = raw.split(':').next().unwrap_or_default();
        Self {
            tokens: head.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Words joined by the separator token; also the cache key component.
    pub fn formatted(&self) -> String {
        self.tokens.join(QUERY_SEPARATOR)
    }

    /// Form value: every word percent-encoded, joined by the separator.
    pub fn form_value(&self) -> String {
        self.tokens
            .iter()
            .map(|t| urlencoding::encode(t).into_owned())
            .collect::<Vec<_>>()
            .join(QUERY_SEPARATOR)
    }
}
