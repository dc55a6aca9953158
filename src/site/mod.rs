//! Document fetching.
//!
//! [`Site`] is the seam between the purge workflow and the network: it GETs a
//! URL or POSTs a form and hands back the final URL and body. [`HttpSite`] is
//! the reqwest-backed implementation with a persistent cookie store;
//! [`Endpoints`] builds the URLs the workflow needs from the site origin.

pub mod http;

use std::future::Future;

use chrono::NaiveDate;
use reqwest::Url;

use crate::error::FetchError;

pub use http::{Account, Credentials, HttpSite, Session};

/// A fetched document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects, used to resolve relative links.
    pub url: Url,
    pub body: String,
}

/// Something that can fetch pages and submit forms on behalf of an
/// authenticated session.
pub trait Site: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<Page, FetchError>> + Send;

    /// POST `fields` form-encoded to `url`.
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// URL builder rooted at the site origin (`scheme://host[:port]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
}

impl Endpoints {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Origin of the given URL, e.g. the page reached after signing in.
    pub fn from_url(url: &Url) -> Self {
        Self::new(url.origin().ascii_serialization())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Members listing; page 1 has no query string.
    pub fn people(&self, page: u32) -> String {
        if page <= 1 {
            format!("{}/people", self.origin)
        } else {
            format!("{}/people?p={page}", self.origin)
        }
    }

    pub fn profile(&self, id: &str) -> String {
        format!("{}/people/show/{id}", self.origin)
    }

    pub fn history(&self, id: &str, day: NaiveDate) -> String {
        format!("{}/history/member/{id}/{}", self.origin, day.format("%Y/%m/%d"))
    }
}
