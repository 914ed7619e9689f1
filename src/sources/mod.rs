//! Source fetchers that turn raw upstream responses into normalized records.
//!
//! Each fetcher maps a heterogeneous source response into zero or more
//! [`NewsRecord`](crate::models::NewsRecord)s plus the skips it observed.
//!
//! # Supported sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | NewsAPI | [`newsapi`] | keyword search API | One GET per query string; requires an API key |
//! | RSS feeds | [`feed`] | RSS polling | One fetch per configured feed URL |
//!
//! # Common patterns
//!
//! - Sources are fetched strictly sequentially, in configuration order
//! - A failing query or feed is logged and skipped; it never aborts the run
//!   or prevents other sources from being processed
//! - Per-item drops are reported as [`SkipReason`](crate::models::SkipReason)s
//!   rather than silently swallowed

pub mod feed;
pub mod newsapi;

use chrono::{Duration, NaiveDateTime, Utc};

/// The aggregation window `[start, end]`, in UTC.
#[derive(Debug, Clone, Copy)]
pub struct FetchWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl FetchWindow {
    /// A window of `hours` hours ending now.
    pub fn ending_now(hours: i64) -> Self {
        let end = Utc::now().naive_utc();
        Self {
            start: end - Duration::hours(hours),
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_spans_requested_hours() {
        let window = FetchWindow::ending_now(48);
        assert_eq!(window.end - window.start, Duration::hours(48));
        assert!(window.start < window.end);
    }
}
