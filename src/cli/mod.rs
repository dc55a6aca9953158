pub mod layout;
pub mod prompt;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

use history_purge::config::PurgeConfig;
use history_purge::people::{build_roster, parse_selection};
use history_purge::purge::Purger;
use history_purge::retry::RetryPolicy;
use history_purge::site::HttpSite;

pub struct Options {
    pub select: Option<String>,
    pub list_only: bool,
}

/// Sign in, show the roster, then purge every selected member.
pub async fn run(config: PurgeConfig, options: Options) -> Result<()> {
    let credentials = prompt::credentials(&config.site).await?;

    let site = HttpSite::new(&config.site)?;
    let session = site.login(&credentials).await.context("login failed")?;
    let today = Local::now().date_naive();

    let roster = build_roster(&site, &session.endpoints, today).await?;
    print!("{}", layout::format_roster(&roster, layout::terminal_width()));
    if options.list_only {
        return Ok(());
    }

    let input = match options.select {
        Some(input) => input,
        None => prompt::selection().await?,
    };
    let selections = parse_selection(&input, roster.len()).context("invalid selection")?;
    if selections.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let purger = Purger::new(&site, &session.endpoints, RetryPolicy::from(&config.retry));
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("  {msg} {bar:30.cyan/blue} {pos}/{len} days ({eta})")
            .expect("valid template")
            .progress_chars("##-"),
    );

    let purged = purger
        .purge_selections(
            &selections,
            &roster,
            session.account.created,
            today,
            &progress,
        )
        .await?;

    for (member, report) in &purged {
        println!(
            "{}: deleted {} entries across {} days",
            member.name, report.entries_deleted, report.days_scanned
        );
    }
    Ok(())
}
