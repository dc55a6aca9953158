//! Purge a member's chat history from a HipChat-style web service.
//!
//! The tool signs in as an administrator, lists the member roster, and for
//! each selected member walks backward one day at a time from today to the
//! member's signup date, submitting every delete form found on that day's
//! history page.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`site`] — The [`site::Site`] fetch seam, URL building, and the reqwest-backed session
//! - [`markup`] — Selector queries over fetched pages
//! - [`people`] — Roster pagination, selection parsing, and member resolution
//! - [`purge`] — The day-by-day deletion walk
//! - [`retry`] — Bounded attempts with linear backoff
//! - [`error`] — Error types for each stage

pub mod config;
pub mod error;
pub mod markup;
pub mod people;
pub mod purge;
pub mod retry;
pub mod site;
