use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A news article as served by the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub body: String,
    /// Region label. Despite the name this is a single value.
    #[serde(deserialize_with = "deserialize_region")]
    pub countries: String,
    /// Raw ISO-8601 timestamp, see [`Article::published_at`]
    pub created_at: String,
    /// Ordered labels; index 0 is the primary category
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    /// Parsed creation instant, `None` if `created_at` is not a recognizable timestamp
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Non-blank body lines, one per paragraph
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.split('\n').filter(|p| !p.trim().is_empty())
    }

    /// Get a preview of the body (first N bytes, cut on a char boundary)
    pub fn preview(&self, max_len: usize) -> String {
        let text = self.body.trim();

        if max_len == 0 {
            return String::new();
        }

        if text.len() <= max_len {
            text.to_string()
        } else {
            let mut end = 0;
            for (idx, ch) in text.char_indices() {
                let next = idx + ch.len_utf8();
                if next > max_len {
                    break;
                }
                end = next;
            }
            format!("{}...", &text[..end])
        }
    }
}

/// Parse the timestamp forms the API is known to emit.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
/// bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// The admin form submits regions as an array while the feed reads them back as
// a string, so accept either and join arrays into one label.
fn deserialize_region<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct RegionVisitor;

    impl<'de> Visitor<'de> for RegionVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a region name or a list of region names")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> std::result::Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<String, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut regions: Vec<String> = Vec::new();
            while let Some(region) = seq.next_element::<String>()? {
                regions.push(region);
            }
            Ok(regions.join(", "))
        }
    }

    deserializer.deserialize_any(RegionVisitor)
}

/// A facet choice: everything, or exactly one label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn only(label: impl Into<String>) -> Self {
        Self::Only(label.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether `value` passes this choice (exact match)
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label == value,
        }
    }

    /// Whether any of `values` passes this choice; `All` passes even an empty list
    pub fn matches_any(&self, values: &[String]) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => values.iter().any(|v| v == label),
        }
    }
}

impl From<Option<String>> for Choice {
    fn from(label: Option<String>) -> Self {
        label.map_or(Self::All, Self::Only)
    }
}

/// Feed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Most recent first
    Newest,
    /// Oldest first
    Oldest,
    /// Most viewed first
    Popular,
}

impl SortOption {
    /// Map a user-facing label to a sort option.
    ///
    /// Unknown labels return `None`, which callers treat as "keep input order".
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
        }
    }
}

/// Inclusive calendar-day bounds, evaluated in UTC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Start of the `from` day (00:00:00.000)
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.from
            .and_then(|d| d.and_hms_milli_opt(0, 0, 0, 0))
            .map(|n| n.and_utc())
    }

    /// End of the `to` day (23:59:59.999)
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .map(|n| n.and_utc())
    }

    /// An undated article never satisfies an active bound.
    pub fn contains(&self, instant: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(instant) = instant else {
            return false;
        };
        if let Some(start) = self.start() {
            if instant < start {
                return false;
            }
        }
        if let Some(end) = self.end() {
            if instant > end {
                return false;
            }
        }
        true
    }
}

/// The caller's current filter and sort choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: Choice,
    pub country: Choice,
    pub dates: DateRange,
    /// `None` keeps input order
    pub sort: Option<SortOption>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            category: Choice::All,
            country: Choice::All,
            dates: DateRange::default(),
            sort: Some(SortOption::Newest),
        }
    }
}

impl Selection {
    pub fn with_category(mut self, category: Choice) -> Self {
        self.category = category;
        self
    }

    pub fn with_country(mut self, country: Choice) -> Self {
        self.country = country;
        self
    }

    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortOption>) -> Self {
        self.sort = sort;
        self
    }
}

/// Data required to create or update an article.
///
/// Categories are left out on purpose so the backend can assign them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub headline: String,
    pub body: String,
    pub countries: Vec<String>,
    pub created_on: NaiveDate,
    pub views: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ArticlePayload<'a> {
    headline: &'a str,
    body: &'a str,
    countries: &'a [String],
    created_at: String,
    views: u64,
}

impl ArticleDraft {
    /// Draft for a new article; `regions` is a comma-separated list
    pub fn new(headline: &str, body: &str, regions: &str, created_on: NaiveDate) -> Self {
        Self {
            headline: headline.trim().to_string(),
            body: body.to_string(),
            countries: split_regions(regions),
            created_on,
            views: 0,
        }
    }

    /// Draft pre-filled from an existing article, keeping its view count.
    ///
    /// Fails when the stored `created_at` cannot be read, since the draft
    /// would otherwise overwrite it with an invented date.
    pub fn from_article(article: &Article) -> Result<Self> {
        let published = article.published_at().ok_or_else(|| {
            Error::InvalidInput(format!(
                "article {} has an unreadable date '{}', a new date is required",
                article.id, article.created_at
            ))
        })?;

        Ok(Self::from_article_on(article, published.date_naive()))
    }

    /// Draft pre-filled from an existing article with an explicit date
    pub fn from_article_on(article: &Article, created_on: NaiveDate) -> Self {
        Self {
            headline: article.headline.clone(),
            body: article.body.clone(),
            countries: split_regions(&article.countries),
            created_on,
            views: article.views,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.headline.trim().is_empty() {
            return Err(Error::InvalidInput("headline is required".to_string()));
        }
        if self.body.trim().is_empty() {
            return Err(Error::InvalidInput("body is required".to_string()));
        }
        if self.countries.is_empty() {
            return Err(Error::InvalidInput("at least one region is required".to_string()));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> ArticlePayload<'_> {
        let created_at = self
            .created_on
            .and_hms_opt(0, 0, 0)
            .map(|n| n.and_utc().to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_default();

        ArticlePayload {
            headline: &self.headline,
            body: &self.body,
            countries: &self.countries,
            created_at,
            views: self.views,
        }
    }
}

/// Split a comma-separated region list, dropping blanks
pub fn split_regions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
