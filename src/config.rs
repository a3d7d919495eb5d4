use crate::jobs::types::Preset;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 { 10_000 }
fn default_user_agent() -> String { format!("midjourney-feed/{}", env!("CARGO_PKG_VERSION")) }

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_preset")]
    pub preset: Preset,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_preset() -> Preset { Preset::Community }
fn default_pages() -> u32 { 1 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            pages: default_pages(),
            user_id: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        if let Err(e) = Self::load_env_from(Path::new(ENV_FILE)) {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    /// A missing file is not an error.
    pub fn load_env_from(path: &Path) -> Result<()> {
        match dotenvy::from_path(path) {
            Err(e) if e.not_found() => Ok(()),
            other => other.with_context(|| format!("Failed to load env file: {}", path.display())),
        }
    }

    /// Session cookie forwarded by the HTTP transport, if any.
    pub fn session_token() -> Option<String> {
        env_non_empty("MIDJOURNEY_SESSION_TOKEN")
    }

    /// User id for the home and bookmarks feeds. The environment wins over
    /// `feed.user_id`.
    pub fn user_id(&self) -> Option<String> {
        env_non_empty("MIDJOURNEY_USER_ID").or_else(|| {
            self.feed.user_id.clone().filter(|id| !id.is_empty())
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| sanitize_value(&v))
        .filter(|v| !v.is_empty())
}

/// Strip carriage returns, BOM, and other invisible chars from a value.
fn sanitize_value(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
