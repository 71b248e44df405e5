//! Maps a [`RawCatalogRecord`] onto [`NormalizedMetadata`].

use crate::catalog::{AudiobookEdition, CatalogBook, CatalogError, EbookEdition, RawCatalogRecord};
use crate::titles::TitleNormalizer;

use super::{NormalizedMetadata, SeriesInfo};

/// Host prepended to catalog cover paths.
const COVER_HOST: &str = "https://storytel.com";
const COVER_LOW_RES: &str = "320x320";
const COVER_HIGH_RES: &str = "640x640";

const MS_PER_MINUTE: u64 = 60_000;

/// Split a category title such as `"Action/Sci-Fi"` into genres.
pub fn split_genre(category: &str) -> Vec<String> {
    category
        .split(['/', ','])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment == "Sci-Fi" {
                "Science-Fiction".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect()
}

/// Absolute URL of the high-resolution variant of a cover path.
pub fn upgrade_cover_url(path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!(
        "{}{}",
        COVER_HOST,
        path.replace(COVER_LOW_RES, COVER_HIGH_RES)
    ))
}

/// The edition whose fields are published.
///
/// The audiobook edition wins whenever it exists, even if some of its
/// fields are empty; the ebook edition is only consulted without one.
#[derive(Debug, Clone, Copy)]
enum Edition<'a> {
    Audiobook(&'a AudiobookEdition),
    Ebook(&'a EbookEdition),
}

impl<'a> Edition<'a> {
    fn select(record: &'a RawCatalogRecord) -> Option<Self> {
        match (&record.audiobook_edition, &record.ebook_edition) {
            (Some(abook), _) => Some(Edition::Audiobook(abook)),
            (None, Some(ebook)) => Some(Edition::Ebook(ebook)),
            (None, None) => None,
        }
    }

    fn description(&self) -> Option<&'a str> {
        match *self {
            Edition::Audiobook(e) => e.description.as_deref(),
            Edition::Ebook(e) => e.description.as_deref(),
        }
    }

    fn publisher(&self) -> Option<&'a str> {
        let publisher = match *self {
            Edition::Audiobook(e) => e.publisher.as_ref(),
            Edition::Ebook(e) => e.publisher.as_ref(),
        };
        publisher.and_then(|p| p.name.as_deref())
    }

    fn release_date(&self) -> Option<&'a str> {
        match *self {
            Edition::Audiobook(e) => e.release_date.as_deref(),
            Edition::Ebook(e) => e.release_date.as_deref(),
        }
    }

    fn isbn(&self) -> Option<&'a str> {
        match *self {
            Edition::Audiobook(e) => e.isbn.as_deref(),
            Edition::Ebook(e) => e.isbn.as_deref(),
        }
    }

    fn narrator(&self) -> Option<&'a str> {
        match *self {
            Edition::Audiobook(e) => e.narrator_as_string.as_deref(),
            Edition::Ebook(_) => None,
        }
    }

    fn duration_minutes(&self) -> Option<u64> {
        match *self {
            Edition::Audiobook(e) => e.length.map(|ms| ms / MS_PER_MINUTE),
            Edition::Ebook(_) => None,
        }
    }
}

/// Formats catalog records for one request locale.
#[derive(Debug, Clone)]
pub struct MetadataFormatter<'a> {
    normalizer: TitleNormalizer<'a>,
    locale: String,
}

impl MetadataFormatter<'static> {
    /// Formatter backed by the standard pattern catalog.
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self::new(TitleNormalizer::default(), locale)
    }
}

impl<'a> MetadataFormatter<'a> {
    pub fn new(normalizer: TitleNormalizer<'a>, locale: impl Into<String>) -> Self {
        Self {
            normalizer,
            locale: locale.into(),
        }
    }

    /// Format one record.
    ///
    /// Fails with [`CatalogError::NotPublishable`] when the record lacks a
    /// book or has neither edition.
    pub fn format(&self, record: &RawCatalogRecord) -> Result<NormalizedMetadata, CatalogError> {
        let book = record
            .book
            .as_ref()
            .ok_or_else(|| CatalogError::NotPublishable("record has no book".to_string()))?;
        let edition = Edition::select(record).ok_or_else(|| {
            CatalogError::NotPublishable(format!(
                "'{}' has no audiobook or ebook edition",
                book.name.as_deref().unwrap_or_default()
            ))
        })?;

        let series = series_info(book);
        let normalized = self.normalizer.normalize(
            book.name.as_deref().unwrap_or_default(),
            series.as_ref().map(|s| s.series_name.as_str()),
            series.as_ref().map(|s| s.sequence.as_str()),
        );

        let genres = book
            .category
            .as_ref()
            .and_then(|c| c.title.as_deref())
            .map(split_genre)
            .filter(|genres| !genres.is_empty());

        let language = present(
            book.language
                .as_ref()
                .and_then(|l| l.iso_value.as_deref()),
        )
        .unwrap_or_else(|| self.locale.clone());

        Ok(NormalizedMetadata {
            title: normalized.title,
            subtitle: normalized.subtitle.filter(|s| !s.is_empty()),
            author: present(book.authors_as_string.as_deref()),
            language: Some(language),
            genres,
            series: series.map(|s| vec![s]),
            cover: upgrade_cover_url(book.large_cover.as_deref()),
            duration: edition.duration_minutes(),
            narrator: present(edition.narrator()),
            description: present(edition.description()),
            publisher: present(edition.publisher()),
            published_year: present(edition.release_date())
                .map(|date| date.chars().take(4).collect()),
            isbn: present(edition.isbn()),
        })
    }
}

/// Series info needs both a named series and a position.
fn series_info(book: &CatalogBook) -> Option<SeriesInfo> {
    let name = book
        .series
        .first()
        .and_then(|s| s.name.as_deref())
        .filter(|n| !n.is_empty())?;
    let sequence = book.series_order.as_deref().filter(|o| !o.is_empty())?;

    Some(SeriesInfo {
        series_name: name.to_string(),
        sequence: sequence.to_string(),
    })
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
