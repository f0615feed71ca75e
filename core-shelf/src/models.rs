//! Domain models for book cards
//!
//! A card is the presentational record of one book, read from the data
//! attributes the server renders onto each card element.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, ShelfError};

/// Text shown in place of an absent optional field.
pub const MISSING: &str = "—";

/// Dataset keys (the camelCase names `element.dataset` exposes).
pub mod dataset {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const AUTHORS: &str = "authors";
    pub const COVER: &str = "cover";
    pub const PUBLISHER: &str = "publisher";
    pub const PAGE_COUNT: &str = "pageCount";
    pub const PUBLISHED_DATE: &str = "publishedDate";
    pub const DESCRIPTION: &str = "description";
    pub const STATUS: &str = "status";
    pub const RATING: &str = "rating";
    pub const USER_BOOK_ID: &str = "userBookId";
}

// =============================================================================
// Shelf status
// =============================================================================

/// Shelf a book sits on.
///
/// The value is kept exactly as the markup spells it, so it can be written
/// back to a `<select>` or posted to the backend unchanged. Equality goes
/// through a canonical key instead: `want`, `want-to-read` and
/// `want_to_read` are the same shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ShelfStatus {
    raw: Cow<'static, str>,
    key: Cow<'static, str>,
}

impl ShelfStatus {
    pub const WANT_TO_READ: Self = Self::known("want_to_read");
    pub const READING: Self = Self::known("reading");
    pub const READ: Self = Self::known("read");
    pub const ABANDONED: Self = Self::known("abandoned");

    const fn known(value: &'static str) -> Self {
        Self {
            raw: Cow::Borrowed(value),
            key: Cow::Borrowed(value),
        }
    }

    /// Value as written in the markup; this is what gets submitted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Canonical key used for comparisons.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self.key() {
            "want_to_read" => "Want to read",
            "reading" => "Reading",
            "read" => "Read",
            "abandoned" => "Abandoned",
            _ => self.as_str(),
        }
    }

    /// Parse a data attribute, treating blanks as absent.
    pub fn parse_attr(raw: Option<&str>) -> Option<Self> {
        normalize(raw).map(Self::from)
    }
}

fn canonical_key(raw: &str) -> String {
    let key = raw.to_lowercase().replace([' ', '-'], "_");
    let canonical = match key.as_str() {
        "want" | "want_to_read" | "wanttoread" | "to_read" => "want_to_read",
        "reading" | "currently_reading" => "reading",
        "read" | "finished" => "read",
        "abandoned" | "dropped" => "abandoned",
        _ => return key,
    };
    canonical.to_string()
}

impl PartialEq for ShelfStatus {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ShelfStatus {}

impl Hash for ShelfStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl From<&str> for ShelfStatus {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            key: Cow::Owned(canonical_key(raw)),
            raw: Cow::Owned(raw.to_string()),
        }
    }
}

impl From<String> for ShelfStatus {
    fn from(raw: String) -> Self {
        ShelfStatus::from(raw.as_str())
    }
}

impl From<ShelfStatus> for String {
    fn from(status: ShelfStatus) -> Self {
        status.raw.into_owned()
    }
}

impl fmt::Display for ShelfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Star rating, 0 (unrated) through [`Rating::MAX`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ShelfError::InvalidRating(value))
        }
    }

    /// Lenient parse used for data attributes: out-of-range values clamp,
    /// garbage becomes 0.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = normalize(raw) else {
            return Self(0);
        };
        let value = raw
            .parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64))
            .unwrap_or(0);
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_rated(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// User book id
// =============================================================================

/// Identifier of a shelf entry owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserBookId(String);

impl UserBookId {
    pub fn parse_attr(raw: Option<&str>) -> Option<Self> {
        normalize(raw).map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Book card
// =============================================================================

/// One book as rendered on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCard {
    pub id: String,
    pub title: String,
    pub authors: Option<String>,
    pub cover: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub status: Option<ShelfStatus>,
    pub rating: Rating,
    pub user_book_id: Option<UserBookId>,
}

impl BookCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<ShelfStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_user_book_id(mut self, id: impl AsRef<str>) -> Self {
        self.user_book_id = UserBookId::parse_attr(Some(id.as_ref()));
        self
    }

    /// Build a card from a dataset lookup (`element.dataset[key]`).
    ///
    /// Keys are the constants in [`dataset`]. Blank values, and the literal
    /// `None`/`null` a template renders for a missing value, count as absent.
    pub fn from_dataset<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| normalize(get(key).as_deref()).map(str::to_string);

        Self {
            id: text(dataset::ID).unwrap_or_default(),
            title: text(dataset::TITLE).unwrap_or_default(),
            authors: text(dataset::AUTHORS),
            cover: text(dataset::COVER),
            publisher: text(dataset::PUBLISHER),
            page_count: text(dataset::PAGE_COUNT),
            published_date: text(dataset::PUBLISHED_DATE),
            description: text(dataset::DESCRIPTION),
            status: ShelfStatus::parse_attr(get(dataset::STATUS).as_deref()),
            rating: Rating::parse_lenient(get(dataset::RATING).as_deref()),
            user_book_id: UserBookId::parse_attr(get(dataset::USER_BOOK_ID).as_deref()),
        }
    }

    /// Whether the card belongs to the signed-in user's shelf.
    pub fn is_owned(&self) -> bool {
        self.user_book_id.is_some()
    }

    /// Case-insensitive substring match against title or authors.
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self
                .authors
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(needle_lowercase))
    }
}

/// Display form of an optional field.
pub fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// Format a Google Books style publication date for display.
///
/// `YYYY` is kept, `YYYY-MM` becomes `MM/YYYY`, `YYYY-MM-DD` becomes
/// `DD/MM/YYYY`. Unparsable values are shown as they are; absent values as
/// [`MISSING`].
pub fn format_published_date(value: Option<&str>) -> String {
    let Some(value) = normalize(value) else {
        return MISSING.to_string();
    };

    match value.len() {
        4 => value.to_string(),
        7 => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
            .map(|d| d.format("%m/%Y").to_string())
            .unwrap_or_else(|_| value.to_string()),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| value.to_string()),
    }
}

fn normalize(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    match value {
        "" | MISSING | "None" | "null" | "undefined" => None,
        v => Some(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dataset_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_dataset_reads_every_field() {
        let data = dataset_of(&[
            ("id", "b-1"),
            ("title", "Throne of Glass"),
            ("authors", "Sarah J. Maas"),
            ("cover", "https://covers.example.com/1.jpg"),
            ("publisher", "Bloomsbury"),
            ("pageCount", "406"),
            ("publishedDate", "2012-08-02"),
            ("description", "An assassin..."),
            ("status", "reading"),
            ("rating", "3"),
            ("userBookId", "42"),
        ]);

        let card = BookCard::from_dataset(|k| data.get(k).cloned());

        assert_eq!(card.id, "b-1");
        assert_eq!(card.title, "Throne of Glass");
        assert_eq!(card.authors.as_deref(), Some("Sarah J. Maas"));
        assert_eq!(card.page_count.as_deref(), Some("406"));
        assert_eq!(card.status, Some(ShelfStatus::READING));
        assert_eq!(card.rating.value(), 3);
        assert_eq!(card.user_book_id.as_ref().map(UserBookId::as_str), Some("42"));
        assert!(card.is_owned());
    }

    #[test]
    fn test_from_dataset_treats_placeholders_as_absent() {
        let data = dataset_of(&[
            ("id", "b-2"),
            ("title", "Noites Brancas"),
            ("publisher", "—"),
            ("description", "  "),
            ("userBookId", "None"),
            ("rating", "abc"),
        ]);

        let card = BookCard::from_dataset(|k| data.get(k).cloned());

        assert_eq!(card.publisher, None);
        assert_eq!(card.description, None);
        assert_eq!(card.user_book_id, None);
        assert_eq!(card.rating, Rating::default());
        assert_eq!(card.status, None);
        assert!(!card.is_owned());
    }

    #[test]
    fn test_status_aliases_compare_equal() {
        assert_eq!(ShelfStatus::from("want"), ShelfStatus::WANT_TO_READ);
        assert_eq!(ShelfStatus::from("Want-To-Read"), ShelfStatus::WANT_TO_READ);
        assert_eq!(ShelfStatus::from(" READ "), ShelfStatus::READ);
        assert_ne!(ShelfStatus::from("re-reading"), ShelfStatus::READING);
        assert_eq!(ShelfStatus::from("Re-Reading"), ShelfStatus::from("re_reading"));
        assert_eq!(ShelfStatus::READING.label(), "Reading");
        assert_eq!(ShelfStatus::from("want").label(), "Want to read");
    }

    #[test]
    fn test_status_keeps_markup_spelling() {
        let status = ShelfStatus::from(" want ");
        assert_eq!(status.as_str(), "want");
        assert_eq!(status.key(), "want_to_read");
        assert_eq!(status.to_string(), "want");
        assert_eq!(ShelfStatus::WANT_TO_READ.as_str(), "want_to_read");
    }

    #[test]
    fn test_status_serde_keeps_raw_value() {
        let json = serde_json::to_string(&ShelfStatus::from("want")).unwrap();
        assert_eq!(json, "\"want\"");
        let back: ShelfStatus = serde_json::from_str("\"want\"").unwrap();
        assert_eq!(back, ShelfStatus::WANT_TO_READ);
        assert_eq!(back.as_str(), "want");
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::new(6), Err(ShelfError::InvalidRating(6)));
        assert_eq!(Rating::new(-1), Err(ShelfError::InvalidRating(-1)));

        assert_eq!(Rating::parse_lenient(Some("9")).value(), 5);
        assert_eq!(Rating::parse_lenient(Some("-2")).value(), 0);
        assert_eq!(Rating::parse_lenient(Some("4.0")).value(), 4);
        assert_eq!(Rating::parse_lenient(None).value(), 0);
        assert!(!Rating::parse_lenient(Some("0")).is_rated());
    }

    #[test]
    fn test_search_matches_title_or_authors() {
        let card = BookCard::new("1", "Banana Split").with_authors("Jane Doe");

        assert!(card.matches_search("ban"));
        assert!(card.matches_search("doe"));
        assert!(!card.matches_search("cherry"));
        assert!(!BookCard::new("2", "Apple").matches_search("doe"));
    }

    #[test]
    fn test_format_published_date() {
        assert_eq!(format_published_date(Some("2012")), "2012");
        assert_eq!(format_published_date(Some("2012-08")), "08/2012");
        assert_eq!(format_published_date(Some("2012-08-02")), "02/08/2012");
        assert_eq!(format_published_date(Some("circa 1900")), "circa 1900");
        assert_eq!(format_published_date(Some("")), MISSING);
        assert_eq!(format_published_date(None), MISSING);
    }

    #[test]
    fn test_or_missing() {
        assert_eq!(or_missing(Some("Penguin")), "Penguin");
        assert_eq!(or_missing(None), "—");
    }
}
