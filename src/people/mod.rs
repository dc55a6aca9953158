//! Member accounts: building the roster, parsing a selection against it, and
//! resolving each selection to a [`Member`].

pub mod resolve;
pub mod roster;
pub mod selection;

use chrono::NaiveDate;

pub use resolve::resolve_raw_id;
pub use roster::{build_roster, parse_signup_date};
pub use selection::{parse_selection, Selection};

/// A member account whose history can be purged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    /// Opaque account id used in profile and history URLs.
    pub id: String,
    /// Signup date; the purge walk never goes earlier than this.
    pub joined: NaiveDate,
}
