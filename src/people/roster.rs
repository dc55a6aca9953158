//! Paginating the members listing into an ordered roster.

use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use super::Member;
use crate::error::RosterError;
use crate::markup;
use crate::site::{Endpoints, Site};

/// Signup dates on the listing are either "N days ago" or "4 July 2019".
pub fn parse_signup_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    let relative = text
        .strip_suffix(" days ago")
        .or_else(|| text.strip_suffix(" day ago"));
    if let Some(days) = relative {
        let days: u64 = days.trim().parse().ok()?;
        return today.checked_sub_days(Days::new(days));
    }
    NaiveDate::parse_from_str(text, "%d %B %Y").ok()
}

/// Fetch every page of the members listing, preserving document order.
pub async fn build_roster<S: Site>(
    site: &S,
    endpoints: &Endpoints,
    today: NaiveDate,
) -> Result<Vec<Member>, RosterError> {
    info!("listing people");
    let mut page = site
        .get(&endpoints.people(1))
        .await
        .map_err(|source| RosterError::Fetch { page: 1, source })?;
    let pages = markup::page_count(&page.body);

    let mut members = Vec::new();
    for n in 1..=pages {
        if n > 1 {
            info!(page = n, pages, "getting people page");
            page = site
                .get(&endpoints.people(n))
                .await
                .map_err(|source| RosterError::Fetch { page: n, source })?;
        }

        for entry in markup::member_entries(&page.body) {
            let Some(id) = entry.id() else {
                warn!(name = %entry.name, "can't find the href for this member");
                continue;
            };
            let joined = parse_signup_date(&entry.joined_text, today).unwrap_or_else(|| {
                warn!(name = %entry.name, text = %entry.joined_text, "unreadable join date");
                NaiveDate::MIN
            });
            members.push(Member {
                name: entry.name.clone(),
                id: id.to_string(),
                joined,
            });
        }
    }

    info!(count = members.len(), "roster complete");
    Ok(members)
}
