//! Variant-specific payloads for catalog items.
//!
//! Each lendable item carries one of these payloads alongside the common
//! title/author/loan state. The payloads are validated attribute bags with
//! a uniform `summary()` contract; none of them affect lending logic.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::kind::ItemKind;

/// Playback capability for audio content.
///
/// Only audiobooks implement this; dispatching on [`ItemDetails`] and
/// asking for the audiobook payload is the supported way to reach it.
pub trait Playable {
    /// Total running time in minutes.
    fn duration_minutes(&self) -> u32;
    /// Audio container format, e.g. "MP3" or "AAC".
    fn format(&self) -> &str;
    /// File size in megabytes.
    fn file_size_mb(&self) -> f64;
    /// Whether the content can be downloaded for offline playback.
    fn is_downloadable(&self) -> bool;
    /// Playback quality label, e.g. "High".
    fn quality(&self) -> &str;
}

/// Variant-specific payload for a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemDetails {
    Book(BookDetails),
    Audiobook(AudiobookDetails),
    EMagazine(MagazineDetails),
}

impl ItemDetails {
    /// The kind tag for this payload.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Book(_) => ItemKind::Book,
            Self::Audiobook(_) => ItemKind::Audiobook,
            Self::EMagazine(_) => ItemKind::EMagazine,
        }
    }

    /// Human-readable summary of the variant fields.
    pub fn summary(&self) -> String {
        match self {
            Self::Book(b) => b.summary(),
            Self::Audiobook(a) => a.summary(),
            Self::EMagazine(m) => m.summary(),
        }
    }

    /// The audiobook payload, if this item is playable.
    pub fn as_playable(&self) -> Option<&dyn Playable> {
        match self {
            Self::Audiobook(a) => Some(a),
            _ => None,
        }
    }
}

/// Validate a required text field, returning the trimmed value.
fn require_text(field: &'static str, value: &str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::blank(field));
    }
    Ok(trimmed.to_string())
}

/// Validate a strictly positive integer field.
fn require_positive(field: &'static str, value: u32) -> Result<u32, CatalogError> {
    if value == 0 {
        return Err(CatalogError::NonPositive { field });
    }
    Ok(value)
}

// ── Book ────────────────────────────────────────────────────────────────────

/// Assumed reading speed for the estimated-reading-time figure.
const MINUTES_PER_PAGE: u32 = 2;

/// Earliest accepted publication year.
const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Payload for a physical or digital book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetails {
    pub page_count: u32,
    pub isbn: String,
    pub genre: String,
    pub publisher: String,
    pub publication_year: i32,
}

impl BookDetails {
    /// Create a validated book payload.
    ///
    /// Fails with an `InvalidArgument` error when the page count is zero,
    /// any text field is blank, or the year is outside
    /// `1000..=current year`.
    pub fn new(
        page_count: u32,
        isbn: &str,
        genre: &str,
        publisher: &str,
        publication_year: i32,
    ) -> Result<Self, CatalogError> {
        let current_year = Local::now().year();
        if publication_year < MIN_PUBLICATION_YEAR || publication_year > current_year {
            return Err(CatalogError::YearOutOfRange(publication_year));
        }
        Ok(Self {
            page_count: require_positive("page count", page_count)?,
            isbn: require_text("ISBN", isbn)?,
            genre: require_text("genre", genre)?,
            publisher: require_text("publisher", publisher)?,
            publication_year,
        })
    }

    /// Estimated reading time in minutes, at two minutes per page.
    pub fn estimated_reading_minutes(&self) -> u32 {
        self.page_count.saturating_mul(MINUTES_PER_PAGE)
    }

    fn summary(&self) -> String {
        format!(
            "Pages: {}, ISBN: {}, Genre: {}, Publisher: {}, Year: {}",
            self.page_count, self.isbn, self.genre, self.publisher, self.publication_year
        )
    }
}

// ── Audiobook ───────────────────────────────────────────────────────────────

/// Payload for an audiobook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudiobookDetails {
    pub duration_minutes: u32,
    pub narrator: String,
    pub format: String,
    pub file_size_mb: f64,
    pub downloadable: bool,
    pub quality: String,
    pub language: String,
}

impl AudiobookDetails {
    /// Create a validated audiobook payload.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        duration_minutes: u32,
        narrator: &str,
        format: &str,
        file_size_mb: f64,
        downloadable: bool,
        quality: &str,
        language: &str,
    ) -> Result<Self, CatalogError> {
        if file_size_mb <= 0.0 {
            return Err(CatalogError::NonPositive { field: "file size" });
        }
        Ok(Self {
            duration_minutes: require_positive("duration", duration_minutes)?,
            narrator: require_text("narrator", narrator)?,
            format: require_text("format", format)?,
            file_size_mb,
            downloadable,
            quality: require_text("quality", quality)?,
            language: require_text("language", language)?,
        })
    }

    /// Running time in hours, rounded to one decimal place.
    pub fn duration_hours(&self) -> f64 {
        (f64::from(self.duration_minutes) / 60.0 * 10.0).round() / 10.0
    }

    /// Supported playback speed multipliers.
    pub fn playback_speeds(&self) -> &'static [f64] {
        &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0]
    }

    fn summary(&self) -> String {
        format!(
            "Duration: {} min ({:.1} hrs), Narrator: {}, Format: {}, Size: {:.1} MB, \
             Quality: {}, Language: {}, Downloadable: {}",
            self.duration_minutes,
            self.duration_hours(),
            self.narrator,
            self.format,
            self.file_size_mb,
            self.quality,
            self.language,
            self.downloadable
        )
    }
}

impl Playable for AudiobookDetails {
    fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn file_size_mb(&self) -> f64 {
        self.file_size_mb
    }

    fn is_downloadable(&self) -> bool {
        self.downloadable
    }

    fn quality(&self) -> &str {
        &self.quality
    }
}

// ── E-Magazine ──────────────────────────────────────────────────────────────

/// An issue counts as recent for this many days after publication.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Payload for an electronic magazine issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagazineDetails {
    pub issue_number: u32,
    pub publisher: String,
    pub category: String,
    pub published_on: NaiveDate,
    pub total_pages: u32,
    pub cover_image_url: String,
    articles: Vec<String>,
    archived: bool,
}

impl MagazineDetails {
    /// Create a validated e-magazine payload.
    ///
    /// The publication date is checked against the local calendar date;
    /// future-dated issues are rejected.
    pub fn new(
        issue_number: u32,
        publisher: &str,
        category: &str,
        published_on: NaiveDate,
        total_pages: u32,
        cover_image_url: &str,
    ) -> Result<Self, CatalogError> {
        if published_on > Local::now().date_naive() {
            return Err(CatalogError::FutureDate(published_on));
        }
        Ok(Self {
            issue_number: require_positive("issue number", issue_number)?,
            publisher: require_text("publisher", publisher)?,
            category: require_text("category", category)?,
            published_on,
            total_pages: require_positive("total pages", total_pages)?,
            cover_image_url: cover_image_url.to_string(),
            articles: Vec::new(),
            archived: false,
        })
    }

    /// Mark the issue as archived.
    pub fn archive(&mut self) -> Result<(), CatalogError> {
        if self.archived {
            return Err(CatalogError::AlreadyArchived(self.issue_number));
        }
        self.archived = true;
        Ok(())
    }

    /// Bring the issue back out of the archive.
    pub fn unarchive(&mut self) -> Result<(), CatalogError> {
        if !self.archived {
            return Err(CatalogError::NotArchived(self.issue_number));
        }
        self.archived = false;
        Ok(())
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Append an article title (stored trimmed). Blank titles are rejected.
    pub fn add_article(&mut self, title: &str) -> Result<(), CatalogError> {
        let title = require_text("article title", title)?;
        self.articles.push(title);
        Ok(())
    }

    /// Snapshot of the article titles.
    pub fn articles(&self) -> Vec<String> {
        self.articles.clone()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    /// Whole days since publication as of `today`.
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        (today - self.published_on).num_days()
    }

    /// Whether the issue was published within the last 30 days.
    pub fn is_recent(&self, today: NaiveDate) -> bool {
        self.age_in_days(today) <= RECENT_WINDOW_DAYS
    }

    fn summary(&self) -> String {
        format!(
            "Issue: {}, Publisher: {}, Category: {}, Published: {}, Pages: {}, \
             Articles: {}, Archived: {}",
            self.issue_number,
            self.publisher,
            self.category,
            self.published_on,
            self.total_pages,
            self.article_count(),
            self.archived
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn magazine() -> MagazineDetails {
        MagazineDetails::new(12, "Condé Nast", "Science", date(2024, 3, 1), 96, "").unwrap()
    }

    #[test]
    fn book_validates_fields() {
        assert!(BookDetails::new(320, "978-0", "Fiction", "Scribner", 1925).is_ok());
        assert!(BookDetails::new(0, "978-0", "Fiction", "Scribner", 1925).is_err());
        assert!(BookDetails::new(320, "  ", "Fiction", "Scribner", 1925).is_err());
        assert!(BookDetails::new(320, "978-0", "Fiction", "Scribner", 999).is_err());
        assert!(BookDetails::new(320, "978-0", "Fiction", "Scribner", 9999).is_err());
    }

    #[test]
    fn book_reading_time_is_two_minutes_per_page() {
        let book = BookDetails::new(150, "978-0", "Fiction", "Scribner", 1999).unwrap();
        assert_eq!(book.estimated_reading_minutes(), 300);
    }

    #[test]
    fn audiobook_validates_fields() {
        assert!(AudiobookDetails::new(540, "Jim Dale", "MP3", 412.5, true, "High", "English").is_ok());
        assert!(AudiobookDetails::new(0, "Jim Dale", "MP3", 412.5, true, "High", "English").is_err());
        assert!(AudiobookDetails::new(540, "Jim Dale", "MP3", 0.0, true, "High", "English").is_err());
        assert!(AudiobookDetails::new(540, "", "MP3", 412.5, true, "High", "English").is_err());
    }

    #[test]
    fn audiobook_duration_rounds_to_one_decimal() {
        let audio =
            AudiobookDetails::new(100, "Jim Dale", "MP3", 80.0, true, "High", "English").unwrap();
        assert!((audio.duration_hours() - 1.7).abs() < f64::EPSILON);
    }

    #[test]
    fn audiobook_is_the_only_playable_variant() {
        let audio =
            AudiobookDetails::new(540, "Jim Dale", "MP3", 412.5, false, "High", "English").unwrap();
        let details = ItemDetails::Audiobook(audio);
        let playable = details.as_playable().unwrap();
        assert_eq!(playable.duration_minutes(), 540);
        assert!(!playable.is_downloadable());

        let book = BookDetails::new(100, "978-0", "Fiction", "Scribner", 1999).unwrap();
        assert!(ItemDetails::Book(book).as_playable().is_none());
    }

    #[test]
    fn magazine_rejects_future_publication_date() {
        let future = Local::now().date_naive() + chrono::Days::new(2);
        let err = MagazineDetails::new(1, "Condé Nast", "Science", future, 96, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn magazine_archive_round_trip() {
        let mut mag = magazine();
        assert!(!mag.is_archived());
        mag.archive().unwrap();
        assert!(mag.is_archived());

        let err = mag.archive().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        mag.unarchive().unwrap();
        assert!(!mag.is_archived());
        assert!(mag.unarchive().is_err());
    }

    #[test]
    fn magazine_articles_are_trimmed_and_counted() {
        let mut mag = magazine();
        mag.add_article("  The Quiet Ocean ").unwrap();
        mag.add_article("Mapping the Deep").unwrap();
        assert!(mag.add_article("   ").is_err());

        assert_eq!(mag.article_count(), 2);
        assert_eq!(mag.articles()[0], "The Quiet Ocean");
    }

    #[test]
    fn magazine_recency_window_is_thirty_days() {
        let mag = magazine();
        assert!(mag.is_recent(date(2024, 3, 31)));
        assert!(!mag.is_recent(date(2024, 4, 1)));
        assert_eq!(mag.age_in_days(date(2024, 3, 11)), 10);
    }

    #[test]
    fn summaries_mention_the_distinguishing_fields() {
        let book = BookDetails::new(218, "978-0-7432-7356-5", "Fiction", "Scribner", 1925).unwrap();
        assert!(book.summary().contains("ISBN: 978-0-7432-7356-5"));

        let mag = magazine();
        assert!(mag.summary().contains("Issue: 12"));
    }
}
