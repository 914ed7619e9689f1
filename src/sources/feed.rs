//! RSS feed fetcher.
//!
//! Downloads a feed, parses it with the `rss` crate, and keeps the entries
//! published inside the aggregation window. A feed that fails to download or
//! parse is logged and skipped as a whole; one broken feed never prevents
//! the other feeds from being processed.

use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use rss::{Channel, Item};
use tracing::{debug, info, instrument, warn};

use crate::models::{FetchOutcome, NewsRecord, SkipReason, TIMESTAMP_FORMAT};
use crate::sources::FetchWindow;

/// Fetch one feed and normalize its entries.
#[instrument(level = "info", skip_all, fields(%label, %url))]
pub async fn fetch(client: &Client, label: &str, url: &str, window: &FetchWindow) -> FetchOutcome {
    let bytes = match client.get(url).send().await {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "Feed body could not be read; skipping feed");
                return FetchOutcome::default();
            }
        },
        Ok(response) => {
            warn!(status = response.status().as_u16(), "Feed returned an error status; skipping feed");
            return FetchOutcome::default();
        }
        Err(e) => {
            warn!(error = %e, "Feed request failed; skipping feed");
            return FetchOutcome::default();
        }
    };

    let channel = match Channel::read_from(&bytes[..]) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Feed did not parse as RSS; skipping feed");
            return FetchOutcome::default();
        }
    };

    let mut outcome = FetchOutcome::default();
    let total = channel.items().len();
    for item in channel.into_items() {
        match normalize(item, label, window.start) {
            Ok(record) => outcome.records.push(record),
            Err(reason) => {
                debug!(%reason, "Dropped feed entry");
                outcome.skips.push(reason);
            }
        }
    }

    info!(
        entries = total,
        kept = outcome.records.len(),
        skipped = outcome.skips.len(),
        "Feed fetch complete"
    );
    outcome
}

/// Normalize one feed entry, keeping it only when published inside the window.
fn normalize(item: Item, label: &str, window_start: NaiveDateTime) -> Result<NewsRecord, SkipReason> {
    let title = item
        .title()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(SkipReason::MissingTitle)?;
    let link = item
        .link()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .ok_or(SkipReason::MissingLink)?;

    let raw_date = item
        .pub_date()
        .ok_or_else(|| SkipReason::BadTimestamp("pubDate ausente".to_string()))?;
    let published = parse_feed_date(raw_date)
        .ok_or_else(|| SkipReason::BadTimestamp(raw_date.to_string()))?;

    if published < window_start {
        return Err(SkipReason::OutsideWindow);
    }

    Ok(NewsRecord {
        title,
        description: item.description().unwrap_or_default().to_string(),
        link,
        published_at: published.format(TIMESTAMP_FORMAT).to_string(),
        source: label.to_string(),
    })
}

/// Parse a feed date into naive UTC.
///
/// RFC 2822 is what RSS `pubDate` should carry; some feeds emit RFC 3339
/// instead, so that is tried as a fallback.
fn parse_feed_date(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.naive_utc())
}
