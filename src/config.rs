use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PurgeConfig {
    pub site: SiteConfig,
    pub retry: RetryConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    /// Sign-in form URL; the origin of the post-login page becomes the site origin.
    pub sign_in_url: String,
    /// Login email. Prompted for when empty.
    pub username: String,
    /// Never read from the config file, only from `HISTORY_PURGE_PASSWORD`.
    #[serde(skip)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetryConfig {
    pub interval_secs: u64,
    pub max_attempts: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sign_in_url: "https://www.hipchat.com/sign_in".into(),
            username: String::new(),
            password: None,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            max_attempts: 6,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Returns `~/.history-purge/`
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".history-purge")
}

/// Returns the default config file path: `~/.history-purge/config.toml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

impl PurgeConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PurgeConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (HISTORY_PURGE_SIGN_IN_URL,
    /// HISTORY_PURGE_USER, HISTORY_PURGE_PASSWORD, HISTORY_PURGE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HISTORY_PURGE_SIGN_IN_URL") {
            self.site.sign_in_url = val;
        }
        if let Ok(val) = std::env::var("HISTORY_PURGE_USER") {
            self.site.username = val;
        }
        if let Ok(val) = std::env::var("HISTORY_PURGE_PASSWORD") {
            self.site.password = Some(val);
        }
        if let Ok(val) = std::env::var("HISTORY_PURGE_LOG_LEVEL") {
            self.log.level = val;
        }
    }
}
