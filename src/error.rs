//! Error taxonomy.
//!
//! Fetch failures are the only retryable class. Markup and selection errors are
//! fatal, resolution errors are recovered by skipping the member.

use chrono::NaiveDate;
use thiserror::Error;

/// Transport-level failure while fetching a page or submitting a form.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server error or throttling; other statuses are read as pages.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Expected markup was absent or unreadable.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("can't find {0} in page")]
    Missing(&'static str),

    #[error("expected exactly one {what}, found {found}")]
    Count { what: &'static str, found: usize },

    #[error("unreadable {field} timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("delete form action {action:?} can't be resolved: {reason}")]
    InvalidAction { action: String, reason: String },
}

/// Malformed interactive selection input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("not a number: {token:?}")]
    MalformedNumber { token: String },

    #[error("wrong number of arguments in range: {token:?}")]
    MalformedRange { token: String },

    #[error("empty member id after '#'")]
    EmptyId,
}

/// Failure to turn a selection into a member.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("can't look up {id}: {source}")]
    Fetch {
        id: String,
        #[source]
        source: FetchError,
    },

    #[error("can't parse profile for {id}: {source}")]
    Markup {
        id: String,
        #[source]
        source: MarkupError,
    },

    #[error("can't find name for {id}")]
    MissingName { id: String },

    #[error("roster index {index} out of range (roster has {len} members)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to fetch members page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Fatal failure while purging one member's history.
#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("tried {attempts} times to pull {day}: {source}")]
    DayFetch {
        day: NaiveDate,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("unexpected markup on {day}: {source}")]
    Markup {
        day: NaiveDate,
        #[source]
        source: MarkupError,
    },

    #[error("tried {attempts} times to delete entry on {day}: {source}")]
    Delete {
        day: NaiveDate,
        attempts: u32,
        #[source]
        source: FetchError,
    },
}
