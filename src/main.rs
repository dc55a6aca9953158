mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use history_purge::config::PurgeConfig;

#[derive(Parser)]
#[command(
    name = "history-purge",
    version,
    about = "Delete members' chat history one day at a time"
)]
struct Cli {
    /// Config file (default: ~/.history-purge/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Login email; prompted for when not set here or in the config
    #[arg(short, long)]
    user: Option<String>,

    /// Sign-in form URL
    #[arg(long)]
    sign_in_url: Option<String>,

    /// Members to purge, e.g. "1,3,5..12,#12345672"; prompted for when absent
    #[arg(short, long)]
    select: Option<String>,

    /// Print the member roster and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => PurgeConfig::load_from(path)?,
        None => PurgeConfig::load()?,
    };
    if let Some(user) = args.user {
        config.site.username = user;
    }
    if let Some(url) = args.sign_in_url {
        config.site.sign_in_url = url;
    }

    // Log to stderr so stdout only carries the roster.
    let filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let terminal = cli::prompt::TerminalGuard::acquire();
    let options = cli::Options {
        select: args.select,
        list_only: args.list,
    };

    tokio::select! {
        result = cli::run(config, options) => result,
        _ = tokio::signal::ctrl_c() => {
            terminal.restore();
            eprintln!();
            std::process::exit(130);
        }
    }
}
