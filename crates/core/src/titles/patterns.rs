//! Locale-tagged title marker patterns.
//!
//! Catalog titles often embed the series position in the title itself,
//! e.g. `"Die drei ???, Folge 12: Der Fluch"`. Each entry in the catalog
//! describes one such convention. The catalog is data only: the stripping
//! algorithm lives in [`super::TitleNormalizer`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Locale tag for conventions that are not tied to one market.
pub const GENERIC_LOCALE: &str = "generic";

/// Per-locale marker vocabulary matched as `<anything>, <Marker> <digits>: `.
///
/// Order matters: entries are tried first to last against a title that is
/// mutated by each successful strip.
const LOCALE_MARKERS: &[(&str, &[&str])] = &[
    ("de", &["Folge", "Band", "Teil"]),
    ("en", &["Episode", "Volume", "Vol\\.", "Part", "Book"]),
    ("sv", &["Avsnitt", "Volym", "Del", "Bok"]),
    ("da", &["Afsnit", "Bind", "Del"]),
    ("no", &["Episode", "Bind", "Del", "Bok"]),
    ("fi", &["Jakso", "Osa", "Kirja"]),
    ("is", &["Þáttur", "Hluti", "Bók"]),
    ("nl", &["Aflevering", "Deel", "Boek"]),
    ("fr", &["Épisode", "Tome", "Partie", "Volume"]),
    ("es", &["Episodio", "Volumen", "Tomo", "Parte", "Libro"]),
    ("it", &["Episodio", "Volume", "Parte", "Libro"]),
    ("pt", &["Episódio", "Volume", "Parte", "Livro"]),
    ("pl", &["Odcinek", "Tom", "Część", "Księga"]),
    ("tr", &["Bölüm", "Cilt", "Kısım"]),
    ("ru", &["Эпизод", "Том", "Часть", "Книга"]),
    ("bg", &["Епизод", "Том", "Част", "Книга"]),
    ("ar", &["الحلقة", "المجلد", "الجزء"]),
    ("he", &["פרק", "כרך", "חלק"]),
    ("hi", &["एपिसोड", "खंड", "भाग"]),
    ("id", &["Episode", "Jilid", "Bagian"]),
    ("th", &["ตอนที่", "เล่ม"]),
];

/// Generic conventions, applied after every locale entry.
///
/// The bare numeric prefixes (`Title - N:` and `Title N:`) come after the
/// word markers because they would otherwise swallow a worded prefix.
const GENERIC_PATTERNS: &[&str] = &[
    r"(?i)^.*?\s*\b(?:Folge|Band|Teil)\s+\d+:\s*",
    r"^.*?\s+-\s+\d+:\s*",
    r"^.*?\s+\d+:\s*",
    r"(?i)\s*\((?:ungekürzt|unabridged)\)\s*$",
    r"(?i)\s*\((?:gekürzt|abridged)\)\s*$",
    r"(?i)\s*,\s*Teil\s+\d+\s*$",
    r"(?i)\s+-\s+.*?(?:Reihe|Serie)\s+\d+\s*$",
];

static STANDARD_CATALOG: Lazy<PatternCatalog> = Lazy::new(|| {
    let mut patterns = Vec::with_capacity(LOCALE_MARKERS.len() + GENERIC_PATTERNS.len());

    for (locale, markers) in LOCALE_MARKERS {
        let source = format!(r"(?i)^.*?,\s*(?:{})\s*\d+:\s*", markers.join("|"));
        patterns.push(TitlePattern::compile(locale, &source));
    }
    for source in GENERIC_PATTERNS {
        patterns.push(TitlePattern::compile(GENERIC_LOCALE, source));
    }

    PatternCatalog::new(patterns)
});

/// One marker convention: where it applies, what it matches, what replaces it.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    locale: &'static str,
    matcher: Regex,
    replacement: &'static str,
}

impl TitlePattern {
    /// Build a stripping pattern from a regex known to be valid.
    fn compile(locale: &'static str, source: &str) -> Self {
        Self {
            locale,
            matcher: Regex::new(source).expect("built-in title pattern must compile"),
            replacement: "",
        }
    }

    /// Create a pattern from an already compiled matcher.
    pub fn new(locale: &'static str, matcher: Regex) -> Self {
        Self {
            locale,
            matcher,
            replacement: "",
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.matcher.is_match(title)
    }

    /// Replace the first match in `title`, leaving everything else untouched.
    pub fn apply(&self, title: &str) -> String {
        self.matcher
            .replacen(title, 1, self.replacement)
            .into_owned()
    }
}

/// Ordered list of title marker patterns.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<TitlePattern>,
}

impl PatternCatalog {
    pub fn new(patterns: Vec<TitlePattern>) -> Self {
        Self { patterns }
    }

    /// The built-in catalog covering every supported market.
    pub fn standard() -> &'static PatternCatalog {
        &STANDARD_CATALOG
    }

    pub fn patterns(&self) -> &[TitlePattern] {
        &self.patterns
    }

    /// Patterns tagged with the given locale, in catalog order.
    pub fn for_locale<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a TitlePattern> {
        self.patterns.iter().filter(move |p| p.locale == locale)
    }

    /// Distinct locale tags, in first-appearance order.
    pub fn locales(&self) -> Vec<&'static str> {
        let mut locales: Vec<&'static str> = Vec::new();
        for pattern in &self.patterns {
            if !locales.contains(&pattern.locale) {
                locales.push(pattern.locale);
            }
        }
        locales
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
