//! Interactive prompts and terminal state.
//!
//! Prompts block, so they run on the blocking pool; that keeps the Ctrl-C
//! branch in `main` responsive while the user is typing.

use anyhow::Result;
use dialoguer::console::Term;
use dialoguer::{Input, Password};

use history_purge::config::SiteConfig;
use history_purge::site::Credentials;

/// Username and password from config/env, prompting for whatever is missing.
pub async fn credentials(site: &SiteConfig) -> Result<Credentials> {
    let username = site.username.clone();
    let password = site.password.clone();

    tokio::task::spawn_blocking(move || -> Result<Credentials> {
        let username = if username.trim().is_empty() {
            Input::<String>::new()
                .with_prompt("Enter Username")
                .interact_text()?
        } else {
            username
        };
        let password = match password {
            Some(password) => password,
            None => Password::new().with_prompt("Enter Password").interact()?,
        };
        Ok(Credentials {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        })
    })
    .await?
}

/// Ask which members to purge.
pub async fn selection() -> Result<String> {
    println!(
        "Enter one or more users to delete. A user missing from the list above \
         can be entered by ID, prefixed with a hash (#)."
    );
    let input = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Select users [eg: 1,3,5..12,#12345672]")
            .interact_text()
    })
    .await??;
    Ok(input)
}

/// Snapshot of the tty mode, restored on drop or on interrupt.
///
/// The password prompt turns echo off; if the process is interrupted while
/// it is showing, the snapshot puts the terminal back.
pub struct TerminalGuard {
    saved: Option<String>,
}

impl TerminalGuard {
    pub fn acquire() -> Self {
        Self { saved: snapshot() }
    }

    pub fn restore(&self) {
        if let Some(saved) = &self.saved {
            apply(saved);
        }
        let _ = Term::stderr().show_cursor();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(unix)]
fn snapshot() -> Option<String> {
    use std::process::{Command, Stdio};

    if !Term::stdout().is_term() {
        return None;
    }
    let output = Command::new("stty")
        .arg("-g")
        .stdin(Stdio::inherit())
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(unix)]
fn apply(saved: &str) {
    use std::process::{Command, Stdio};

    let _ = Command::new("stty")
        .arg(saved)
        .stdin(Stdio::inherit())
        .status();
}

#[cfg(not(unix))]
fn snapshot() -> Option<String> {
    None
}

#[cfg(not(unix))]
fn apply(_saved: &str) {}
