//! The in-memory stages between fetching and rendering.
//!
//! Everything here is a single pass over a small `Vec<NewsRecord>`:
//!
//! 1. [`KeywordFilter`]: inclusion/exclusion keyword matching on titles (RSS path)
//! 2. [`dedupe_by_title`]: drop records whose exact title was already seen
//! 3. [`sort_newest_first`]: stable sort by normalized timestamp, descending

use itertools::Itertools;

use crate::models::NewsRecord;

/// Title keyword policy applied to RSS records.
///
/// Matching is case-insensitive substring containment against the lower-cased
/// title, not tokenized matching: the phrase "dolar" matches "dolares".
///
/// Exclusion takes precedence: a title matching any `exclude` phrase is
/// dropped even when an `include` phrase also matches. With an empty
/// `include` list, every non-excluded record passes.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    /// Phrases that drop a record when found in its title.
    pub exclude: Vec<String>,
    /// Phrases of which at least one must match, when the list is non-empty.
    pub include: Vec<String>,
}

impl KeywordFilter {
    /// Build a policy, lower-casing every phrase up front.
    pub fn new<E, I>(exclude: &[E], include: &[I]) -> Self
    where
        E: AsRef<str>,
        I: AsRef<str>,
    {
        Self {
            exclude: exclude.iter().map(|s| s.as_ref().to_lowercase()).collect(),
            include: include.iter().map(|s| s.as_ref().to_lowercase()).collect(),
        }
    }

    /// Decide whether a title passes the policy.
    pub fn accepts(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        if self.exclude.iter().any(|phrase| lowered.contains(phrase)) {
            return false;
        }
        if self.include.is_empty() {
            return true;
        }
        self.include.iter().any(|phrase| lowered.contains(phrase))
    }

    /// Apply the policy to a whole batch, preserving order.
    pub fn apply(&self, records: Vec<NewsRecord>) -> Vec<NewsRecord> {
        records
            .into_iter()
            .filter(|record| self.accepts(&record.title))
            .collect()
    }
}

/// Drop records whose exact title has already been seen, keeping the first.
///
/// First occurrence wins: a later duplicate is discarded even when it carries
/// richer data such as a description.
pub fn dedupe_by_title(records: Vec<NewsRecord>) -> Vec<NewsRecord> {
    records
        .into_iter()
        .unique_by(|record| record.title.clone())
        .collect()
}

/// Stable sort by `published_at`, most recent first.
///
/// Timestamps are normalized to a lexicographically sortable form, so string
/// comparison is chronological comparison. Ties keep their input order.
pub fn sort_newest_first(records: &mut [NewsRecord]) {
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
