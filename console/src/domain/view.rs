//! View projection: filter and sort a page of records for display.
//!
//! `project` is the single derivation from `(records, view)` to what the
//! operator sees. It never mutates its inputs.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UserRecord;

/// Field a projection sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Given name.
    #[default]
    FirstName,
    /// Family name.
    LastName,
    /// Contact email.
    Email,
}

impl SortKey {
    fn field(self, record: &UserRecord) -> &str {
        match self {
            Self::FirstName => record.first_name(),
            Self::LastName => record.last_name(),
            Self::Email => record.email(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort key or order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewParseError {
    /// Not one of `first_name`, `last_name`, `email`.
    #[error("unknown sort key '{0}' (expected first_name, last_name or email)")]
    UnknownSortKey(String),
    /// Not one of `asc`, `desc`.
    #[error("unknown sort order '{0}' (expected asc or desc)")]
    UnknownSortOrder(String),
}

impl FromStr for SortKey {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            other => Err(ViewParseError::UnknownSortKey(other.to_owned())),
        }
    }
}

/// Direction of a projection sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Natural lexicographic order.
    #[default]
    Ascending,
    /// Reverse of ascending.
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(ViewParseError::UnknownSortOrder(other.to_owned())),
        }
    }
}

/// Ephemeral presentation state: search term plus sort.
///
/// The default view shows everything sorted by first name, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ViewState {
    /// Substring filter; empty matches all.
    pub search_term: String,
    /// Field to sort on.
    pub sort_key: SortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl ViewState {
    /// Build a view from its parts.
    pub fn new(search_term: impl Into<String>, sort_key: SortKey, sort_order: SortOrder) -> Self {
        Self {
            search_term: search_term.into(),
            sort_key,
            sort_order,
        }
    }
}

fn matches_term(record: &UserRecord, needle: &str) -> bool {
    [record.first_name(), record.last_name(), record.email()]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn compare_by(key: SortKey, a: &UserRecord, b: &UserRecord) -> Ordering {
    key.field(a).to_lowercase().cmp(&key.field(b).to_lowercase())
}

/// Filter then sort `records` according to `view`.
///
/// The filter is a case-insensitive substring match against first name,
/// last name and email. The sort is case-insensitive and stable, so ties keep
/// their input order in both directions.
///
/// # Examples
/// ```
/// use admin_console::domain::{project, UserId, UserRecord, ViewState};
///
/// let bob = UserRecord::new(UserId::new(1).unwrap(), "Bob", "B", "b@x.com", "");
/// let amy = UserRecord::new(UserId::new(2).unwrap(), "Amy", "A", "a@x.com", "");
/// let shown = project(&[bob, amy], &ViewState::default());
/// assert_eq!(shown[0].first_name(), "Amy");
/// ```
pub fn project(records: &[UserRecord], view: &ViewState) -> Vec<UserRecord> {
    let needle = view.search_term.to_lowercase();
    let mut shown: Vec<UserRecord> = records
        .iter()
        .filter(|record| needle.is_empty() || matches_term(record, &needle))
        .cloned()
        .collect();

    let key = view.sort_key;
    match view.sort_order {
        SortOrder::Ascending => shown.sort_by(|a, b| compare_by(key, a, b)),
        SortOrder::Descending => shown.sort_by(|a, b| compare_by(key, b, a)),
    }
    shown
}

/// Memoises the last projection keyed by collection revision and view.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    last: Option<(u64, ViewState, Vec<UserRecord>)>,
}

impl ProjectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the projection for `records` at `revision`, recomputing only
    /// when the revision or the view changed since the previous call.
    pub fn project(&mut self, revision: u64, records: &[UserRecord], view: &ViewState) -> &[UserRecord] {
        let fresh = matches!(&self.last, Some((rev, cached_view, _)) if *rev == revision && cached_view == view);
        if !fresh {
            self.last = Some((revision, view.clone(), project(records, view)));
        }
        match &self.last {
            Some((_, _, shown)) => shown.as_slice(),
            None => &[],
        }
    }
}
