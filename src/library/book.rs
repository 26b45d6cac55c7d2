//! Book record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single book record held by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned at creation.
    pub id: String,

    /// Book name (title).
    pub name: String,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Last page read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,

    /// Whether the last page has been reached.
    pub finished: bool,

    /// Whether the book is currently being read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,

    /// Creation time.
    #[serde(with = "iso8601")]
    pub inserted_at: DateTime<Utc>,

    /// Last modification time.
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload.
    pub fn new(id: String, name: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = payload.is_finished();

        Self {
            id,
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field with the payload values.
    ///
    /// `id` and `inserted_at` are left untouched.
    pub fn apply(&mut self, name: String, payload: BookPayload, now: DateTime<Utc>) {
        self.finished = payload.is_finished();
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }

    /// Check whether the name contains `term` as a whole word, ignoring case.
    pub fn name_has_word(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name
            .to_lowercase()
            .split_whitespace()
            .any(|word| word == term)
    }

    /// Reduced view used in listings.
    pub fn summary_view(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Client-supplied book fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Book name; required.
    #[serde(default)]
    pub name: Option<String>,
    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Author name.
    #[serde(default)]
    pub author: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Publisher name.
    #[serde(default)]
    pub publisher: Option<String>,
    /// Total number of pages.
    #[serde(default)]
    pub page_count: Option<u32>,
    /// Last page read.
    #[serde(default)]
    pub read_page: Option<u32>,
    /// Whether the book is currently being read.
    #[serde(default)]
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Whether the read page is past the page count.
    ///
    /// Only decidable when both values were supplied.
    pub fn read_page_exceeds_count(&self) -> bool {
        matches!((self.read_page, self.page_count), (Some(read), Some(count)) if read > count)
    }

    /// Derived `finished` flag.
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// Listing projection of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Book ID.
    pub id: String,
    /// Book name.
    pub name: String,
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Listing query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Whole-word name match.
    #[serde(default)]
    pub name: Option<String>,
    /// `"1"` or `"0"`.
    #[serde(default)]
    pub reading: Option<String>,
    /// `"1"` or `"0"`.
    #[serde(default)]
    pub finished: Option<String>,
}

/// The single criterion a filter resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion<'a> {
    /// Match a word in the name.
    Name(&'a str),
    /// Match the `reading` flag.
    Reading(bool),
    /// Match the `finished` flag.
    Finished(bool),
    /// No criterion given.
    Unfiltered,
}

impl BookFilter {
    /// Build a filter from raw query pairs.
    ///
    /// Repeated keys keep their first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut filter.name,
                "reading" => &mut filter.reading,
                "finished" => &mut filter.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        filter
    }

    /// Resolve the filter by precedence: name, then reading, then finished.
    pub fn criterion(&self) -> Criterion<'_> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            Criterion::Name(name)
        } else if let Some(flag) = self.reading.as_deref().and_then(parse_flag) {
            Criterion::Reading(flag)
        } else if let Some(flag) = self.finished.as_deref().and_then(parse_flag) {
            Criterion::Finished(flag)
        } else {
            Criterion::Unfiltered
        }
    }
}

/// Parse a `"1"`/`"0"` query flag; anything else is ignored.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Millisecond-precision UTC timestamps, e.g. `2024-01-31T08:15:00.123Z`.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
