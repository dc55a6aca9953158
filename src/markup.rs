//! Selector queries over fetched pages.
//!
//! Every selector the workflow depends on lives here. The site's markup is
//! assumed stable; anything required that is missing is a [`MarkupError`].

use chrono::NaiveDateTime;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::MarkupError;
use crate::site::Page;

/// Format of the `ucreated` meta tag.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Link prefix stripped from member links to get the account id.
pub const PROFILE_PATH_PREFIX: &str = "/people/show/";

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn first_attr(doc: &Html, css: &'static str, attr: &str) -> Option<String> {
    doc.select(&selector(css))
        .find_map(|el| el.value().attr(attr))
        .map(str::to_string)
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Value of the sign-in form's `xsrf_token` input.
pub fn xsrf_token(body: &str) -> Result<String, MarkupError> {
    let doc = Html::parse_document(body);
    first_attr(&doc, "input[name=xsrf_token]", "value").ok_or(MarkupError::Missing("xsrf_token"))
}

/// The post-login page carries exactly one welcome header.
pub fn check_welcome_header(body: &str) -> Result<(), MarkupError> {
    let doc = Html::parse_document(body);
    let found = doc.select(&selector("div.aui-page-header-main h1")).count();
    if found == 1 {
        Ok(())
    } else {
        Err(MarkupError::Count {
            what: "welcome header",
            found,
        })
    }
}

/// Account metadata embedded in `<meta>` tags on the login and profile pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMeta {
    pub uid: Option<String>,
    pub created: NaiveDateTime,
}

pub fn profile_metadata(body: &str) -> Result<ProfileMeta, MarkupError> {
    let doc = Html::parse_document(body);
    let uid = first_attr(&doc, "meta[name=uid]", "content");
    let raw = first_attr(&doc, "meta[name=ucreated]", "content")
        .ok_or(MarkupError::Missing("account creation date"))?;
    let created = NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        MarkupError::InvalidTimestamp {
            field: "ucreated",
            value: raw.clone(),
        }
    })?;
    Ok(ProfileMeta { uid, created })
}

/// Display name from a profile page header; `None` when absent or blank.
pub fn profile_name(body: &str) -> Option<String> {
    let doc = Html::parse_document(body);
    let name: String = doc
        .select(&selector("div.aui-item h2"))
        .map(text_of)
        .collect();
    (!name.is_empty()).then_some(name)
}

/// Number of listing pages. Prev and next are links but the active page is
/// not, so the page count is the number of pagination links minus one (at
/// least one page).
pub fn page_count(body: &str) -> u32 {
    let doc = Html::parse_document(body);
    let links = doc.select(&selector("ol.aui-nav a")).count() as u32;
    links.saturating_sub(1).max(1)
}

/// One `a.name` entry on a members listing page, before date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: String,
    pub href: Option<String>,
    pub joined_text: String,
}

impl MemberEntry {
    /// Account id: the link with the profile prefix removed.
    pub fn id(&self) -> Option<&str> {
        self.href
            .as_deref()
            .map(|href| href.strip_prefix(PROFILE_PATH_PREFIX).unwrap_or(href))
    }
}

pub fn member_entries(body: &str) -> Vec<MemberEntry> {
    let doc = Html::parse_document(body);
    doc.select(&selector("a.name"))
        .map(|link| MemberEntry {
            name: text_of(link),
            href: link.value().attr("href").map(str::to_string),
            joined_text: joined_text(link),
        })
        .collect()
}

/// Text of the `headers="date-joined"` cells next to the link's grandparent.
fn joined_text(link: ElementRef<'_>) -> String {
    let Some(cell) = link.parent().and_then(|p| p.parent()) else {
        return String::new();
    };
    let Some(row) = cell.parent() else {
        return String::new();
    };
    let cell_id = cell.id();
    let text: String = row
        .children()
        .filter(|sibling| sibling.id() != cell_id)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().attr("headers") == Some("date-joined"))
        .flat_map(|el| el.text())
        .collect();
    text.trim().to_string()
}

/// A delete form found on a history page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteForm {
    pub action: Url,
    pub fields: Vec<(String, String)>,
}

impl DeleteForm {
    /// Set a field, replacing any earlier value for the same name.
    fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(field) => field.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

/// Every `div.delete form` on a history page, with its action resolved
/// against the page URL and the name/value of every input that has both.
pub fn delete_forms(page: &Page) -> Result<Vec<DeleteForm>, MarkupError> {
    let doc = Html::parse_document(&page.body);
    let input = selector("input");

    doc.select(&selector("div.delete form"))
        .map(|form| -> Result<DeleteForm, MarkupError> {
            let raw = form
                .value()
                .attr("action")
                .ok_or(MarkupError::Missing("action for the delete form"))?;
            let action = page
                .url
                .join(raw)
                .map_err(|e| MarkupError::InvalidAction {
                    action: raw.to_string(),
                    reason: e.to_string(),
                })?;

            let mut parsed = DeleteForm {
                action,
                fields: Vec::new(),
            };
            for el in form.select(&input) {
                if let (Some(name), Some(value)) = (el.value().attr("name"), el.value().attr("value")) {
                    parsed.set(name, value);
                }
            }
            Ok(parsed)
        })
        .collect()
}
