//! Title cleanup: strip series markers and split off a subtitle.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use super::PatternCatalog;

/// Minimum length of a trailing `:`/`-` segment for it to become the subtitle.
const MIN_SUBTITLE_LEN: usize = 3;

/// A title split into its main part and an optional subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTitle {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Applies a [`PatternCatalog`] and series knowledge to raw catalog titles.
#[derive(Debug, Clone, Copy)]
pub struct TitleNormalizer<'a> {
    catalog: &'a PatternCatalog,
}

impl Default for TitleNormalizer<'static> {
    fn default() -> Self {
        Self::new(PatternCatalog::standard())
    }
}

impl<'a> TitleNormalizer<'a> {
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Normalize a raw title.
    ///
    /// The pattern sweep runs twice: once on the raw title and once after the
    /// series and separator rules have truncated it. It does not loop until
    /// nothing changes, so titles with more marker layers than that keep
    /// the leftovers.
    ///
    /// The series rule only applies when both the name and the order are
    /// known.
    pub fn normalize(
        &self,
        raw_title: &str,
        series_name: Option<&str>,
        series_order: Option<&str>,
    ) -> NormalizedTitle {
        let mut title = self.sweep(raw_title);
        let mut subtitle = None;

        let series = series_name
            .filter(|n| !n.is_empty())
            .zip(series_order.filter(|o| !o.is_empty()));
        if let Some((name, order)) = series {
            subtitle = Some(format!("{} {}", name, order));

            if title.contains(name) {
                title = strip_series_name(&title, name);
            }
        }

        if let Some(idx) = title.find([':', '-']) {
            let head = &title[..idx];
            let tail = title[idx + 1..].trim();
            if tail.chars().count() >= MIN_SUBTITLE_LEN {
                subtitle = Some(tail.to_string());
                title = head.to_string();
            }
        }

        let title = self.sweep(&title);

        NormalizedTitle {
            title: title.trim().to_string(),
            subtitle: subtitle.map(|s| s.trim().to_string()),
        }
    }

    /// One left-to-right pass over the catalog, each pattern stripping at most
    /// its first match from the output of the previous one.
    fn sweep(&self, title: &str) -> String {
        self.catalog
            .patterns()
            .iter()
            .fold(title.to_string(), |acc, pattern| pattern.apply(&acc))
    }
}

/// Cut the title at a `,`/`-` that introduces the series name, or drop the
/// first literal occurrence of the name when no such separator exists.
fn strip_series_name(title: &str, name: &str) -> String {
    let leading = RegexBuilder::new(&format!(r"^(.*?)[,\-]\s*{}", regex::escape(name)))
        .case_insensitive(true)
        .build()
        .ok()
        .and_then(|re| re.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    match leading {
        Some(head) => head,
        None => title.replacen(name, "", 1),
    }
}
