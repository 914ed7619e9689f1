//! Data models for aggregated news records.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`NewsRecord`]: A normalized news item, regardless of which source produced it
//! - [`SkipReason`]: Why a raw source item was dropped instead of normalized
//! - [`FetchOutcome`]: What one fetch pass produced (kept records plus observed skips)
//!
//! Records are value objects: a fetcher creates them, the filter/dedupe stages
//! may drop them, and nothing mutates them afterwards.

use thiserror::Error;

/// The timestamp format every record is normalized to.
///
/// Lexicographic order on this form equals chronological order, so the
/// sorter can compare the strings directly.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A normalized news item from any source.
///
/// # Fields
///
/// * `title` - Headline; non-empty, and the dedupe key (exact, case-sensitive)
/// * `description` - Optional teaser text; may be empty
/// * `link` - URL of the full article
/// * `published_at` - Publication timestamp in [`TIMESTAMP_FORMAT`]
/// * `source` - Human-readable origin name (e.g. "Ámbito Financiero")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    /// The headline. Non-empty; used as the deduplication key.
    pub title: String,
    /// Teaser or summary text. Empty when the source provided none.
    pub description: String,
    /// URL of the full article.
    pub link: String,
    /// Publication timestamp, normalized to `YYYY-MM-DD HH:MM`.
    pub published_at: String,
    /// Human-readable name of the originating source.
    pub source: String,
}

/// Why a raw source item was dropped during normalization.
///
/// Fetchers report these instead of silently swallowing bad items, so a run's
/// drop causes show up in the logs and can be asserted on in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The item had no title, or an empty one.
    #[error("item has no title")]
    MissingTitle,
    /// The item had no link, or an empty one.
    #[error("item has no link")]
    MissingLink,
    /// The item's timestamp did not parse against the expected format.
    #[error("unparseable timestamp: {0}")]
    BadTimestamp(String),
    /// The item was published before the start of the aggregation window.
    #[error("published before the aggregation window")]
    OutsideWindow,
}

/// The result of fetching one source (or one query against a source).
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Records that normalized successfully.
    pub records: Vec<NewsRecord>,
    /// Items that were dropped, with the reason each was dropped.
    pub skips: Vec<SkipReason>,
}

impl FetchOutcome {
    /// Merge another outcome into this one, preserving order.
    pub fn extend(&mut self, other: FetchOutcome) {
        self.records.extend(other.records);
        self.skips.extend(other.skips);
    }
}
