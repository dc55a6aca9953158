#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use history_purge::error::FetchError;
use history_purge::people::Member;
use history_purge::site::{Endpoints, Page, Site};
use reqwest::Url;

pub const ORIGIN: &str = "https://chat.test";

/// A scripted reply for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    /// Fails with `FetchError::Status`.
    Status(u16),
}

/// A request the site received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub fields: Vec<(String, String)>,
}

/// In-memory [`Site`] that replays scripted replies per URL and records
/// every request in order.
///
/// Each URL has a queue of replies; the last reply repeats once the queue is
/// down to one. URLs without a script answer with an empty page.
#[derive(Default)]
pub struct MockSite {
    replies: Mutex<HashMap<(&'static str, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, url: impl Into<String>, replies: impl IntoIterator<Item = Reply>) {
        self.script("GET", url.into(), replies);
    }

    pub fn on_post(&self, url: impl Into<String>, replies: impl IntoIterator<Item = Reply>) {
        self.script("POST", url.into(), replies);
    }

    fn script(&self, method: &'static str, url: String, replies: impl IntoIterator<Item = Reply>) {
        self.replies
            .lock()
            .unwrap()
            .insert((method, url), replies.into_iter().collect());
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self, method: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .map(|r| r.url)
            .collect()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Page, FetchError> {
        self.requests.lock().unwrap().push(Request {
            method,
            url: url.to_string(),
            fields: fields.to_vec(),
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(&(method, url.to_string())) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply.unwrap_or_else(|| Reply::Body("<html><body></body></html>".into())) {
            Reply::Body(body) => Ok(Page {
                url: Url::parse(url).expect("mock URL is absolute"),
                body,
            }),
            Reply::Status(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }
}

impl Site for MockSite {
    async fn get(&self, url: &str) -> Result<Page, FetchError> {
        self.respond("GET", url, &[])
    }

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page, FetchError> {
        self.respond("POST", url, fields)
    }
}

pub fn endpoints() -> Endpoints {
    Endpoints::new(ORIGIN)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

pub fn member(name: &str, id: &str, joined: NaiveDate) -> Member {
    Member {
        name: name.into(),
        id: id.into(),
        joined,
    }
}

/// A history page with one delete form per `(action, message_id)`.
pub fn history_page(entries: &[(&str, &str)]) -> String {
    let forms: String = entries
        .iter()
        .map(|(action, id)| {
            format!(
                r#"<div class="message"><p>text</p><div class="delete">
                     <form method="post" action="{action}">
                       <input type="hidden" name="xsrf_token" value="tok">
                       <input type="hidden" name="message_id" value="{id}">
                       <input type="submit" value="Delete">
                     </form>
                   </div></div>"#
            )
        })
        .collect();
    format!("<html><body>{forms}</body></html>")
}

/// A profile page as served at `/people/show/{id}`.
pub fn profile_page(name: &str, created: &str) -> String {
    format!(
        r#"<html><head><meta name="uid" content="1"><meta name="ucreated" content="{created}"></head>
           <body><div class="aui-item"><h2>{name}</h2></div></body></html>"#
    )
}

/// A members listing page with `pages` pagination entries.
pub fn people_page(pages: u32, rows: &[(&str, Option<&str>, &str)]) -> String {
    let mut nav = String::from(r#"<ol class="aui-nav"><li><a>Prev</a></li><li>1</li>"#);
    for p in 2..=pages {
        nav.push_str(&format!(r#"<li><a href="/people?p={p}">{p}</a></li>"#));
    }
    nav.push_str(r#"<li><a>Next</a></li></ol>"#);

    let rows: String = rows
        .iter()
        .map(|(name, id, joined)| {
            let href = id
                .map(|id| format!(r#" href="/people/show/{id}""#))
                .unwrap_or_default();
            format!(
                r#"<tr><td headers="name"><div><a class="name"{href}>{name}</a></div></td>
                   <td headers="date-joined">{joined}</td></tr>"#
            )
        })
        .collect();
    format!("<html><body>{nav}<table><tbody>{rows}</tbody></table></body></html>")
}
