//! The history purge walk.
//!
//! For one member, every day from today back to [`lower_bound`] is fetched,
//! the delete forms on it are extracted, and each one is submitted. Page
//! fetches and deletions are retried independently with the [`RetryPolicy`];
//! running out of attempts on either is fatal, as is a delete form whose
//! target can't be read. Days are processed strictly one after another.

pub mod dates;

use chrono::{NaiveDate, NaiveDateTime};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::error::PurgeError;
use crate::markup::{self, DeleteForm};
use crate::people::{Member, Selection};
use crate::retry::RetryPolicy;
use crate::site::{Endpoints, Site};

pub use dates::{lower_bound, DateWalk};

/// What a purge pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub days_scanned: u64,
    pub entries_deleted: u64,
}

pub struct Purger<'a, S> {
    site: &'a S,
    endpoints: &'a Endpoints,
    retry: RetryPolicy,
}

impl<'a, S: Site> Purger<'a, S> {
    pub fn new(site: &'a S, endpoints: &'a Endpoints, retry: RetryPolicy) -> Self {
        Self {
            site,
            endpoints,
            retry,
        }
    }

    /// Resolve and purge each selection in order.
    ///
    /// A selection that can't be resolved is logged and skipped; any purge
    /// failure stops the run.
    pub async fn purge_selections(
        &self,
        selections: &[Selection],
        roster: &[Member],
        account_created: NaiveDateTime,
        today: NaiveDate,
        progress: &ProgressBar,
    ) -> Result<Vec<(Member, PurgeReport)>, PurgeError> {
        let mut purged = Vec::new();
        for selection in selections {
            let member = match selection.resolve(roster, self.site, self.endpoints).await {
                Ok(member) => member,
                Err(error) => {
                    progress.suspend(|| warn!(%error, "skipping selection"));
                    continue;
                }
            };

            let end = lower_bound(account_created.date(), member.joined);
            progress.reset();
            progress.set_length(DateWalk::total_days(today, end));
            match self.walk(&member, today, end, progress).await {
                Ok(report) => purged.push((member, report)),
                Err(error) => {
                    progress.finish_and_clear();
                    return Err(error);
                }
            }
        }
        progress.finish_and_clear();
        Ok(purged)
    }

    /// Delete every history entry of `member` from `today` back to the lower
    /// bound. `progress` is ticked once per day scanned.
    pub async fn purge_member(
        &self,
        member: &Member,
        account_created: NaiveDateTime,
        today: NaiveDate,
        progress: &ProgressBar,
    ) -> Result<PurgeReport, PurgeError> {
        let end = lower_bound(account_created.date(), member.joined);
        self.walk(member, today, end, progress).await
    }

    async fn walk(
        &self,
        member: &Member,
        today: NaiveDate,
        end: NaiveDate,
        progress: &ProgressBar,
    ) -> Result<PurgeReport, PurgeError> {
        progress.suspend(|| {
            info!(member = %member.name, id = %member.id, from = %today, to = %end, "purging history")
        });

        let mut report = PurgeReport::default();
        for day in DateWalk::new(today, end) {
            progress.set_message(format!("{} @ {day}", member.name));
            report.entries_deleted += self.purge_day(member, day, progress).await?;
            report.days_scanned += 1;
            progress.inc(1);
        }

        progress.suspend(|| {
            info!(
                member = %member.name,
                days = report.days_scanned,
                deleted = report.entries_deleted,
                "finished member"
            )
        });
        Ok(report)
    }

    /// Fetch one day's history page and delete everything on it.
    async fn purge_day(
        &self,
        member: &Member,
        day: NaiveDate,
        progress: &ProgressBar,
    ) -> Result<u64, PurgeError> {
        debug!(member = %member.name, %day, "checking");

        let site = self.site;
        let url = self.endpoints.history(&member.id, day);
        let page = self
            .retry
            .run("pull day", |_| site.get(&url))
            .await
            .map_err(|source| PurgeError::DayFetch {
                day,
                attempts: self.retry.attempts(),
                source,
            })?;

        let forms = markup::delete_forms(&page).map_err(|source| PurgeError::Markup { day, source })?;
        if forms.is_empty() {
            return Ok(0);
        }

        progress.suspend(|| {
            info!(member = %member.name, %day, entries = forms.len(), "found entries, deleting")
        });
        for form in &forms {
            self.delete(form, day).await?;
        }
        Ok(forms.len() as u64)
    }

    async fn delete(&self, form: &DeleteForm, day: NaiveDate) -> Result<(), PurgeError> {
        let site = self.site;
        let action = form.action.as_str();
        let fields = form.fields.as_slice();
        self.retry
            .run("delete entry", |_| site.post_form(action, fields))
            .await
            .map_err(|source| PurgeError::Delete {
                day,
                attempts: self.retry.attempts(),
                source,
            })?;
        Ok(())
    }
}
