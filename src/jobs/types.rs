use super::query::RecentJobsQuery;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One job record from the recent-jobs listing. Only `id` is guaranteed;
/// unknown fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub full_command: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub enqueue_time: Option<String>,
    #[serde(default)]
    pub image_paths: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One fetched page of the feed.
#[derive(Debug, Clone)]
pub struct RecentJobs {
    /// The query that produced this page, with the cursor pinned for `new`.
    pub query: RecentJobsQuery,
    pub jobs: Vec<Job>,
    pub page: u32,
}

impl RecentJobs {
    /// Query for the page after this one.
    pub fn next_query(&self) -> RecentJobsQuery {
        self.query.next_page()
    }
}

/// Named feeds with fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Home,
    Community,
    Personal,
    Bookmarks,
}

impl Preset {
    pub fn requires_user(&self) -> bool {
        matches!(self, Preset::Home | Preset::Bookmarks)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Preset::Home => "home",
            Preset::Community => "community",
            Preset::Personal => "personal",
            Preset::Bookmarks => "bookmarks",
        };
        f.write_str(s)
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Preset::Home),
            "community" => Ok(Preset::Community),
            "personal" => Ok(Preset::Personal),
            "bookmarks" => Ok(Preset::Bookmarks),
            other => anyhow::bail!("unknown feed preset: {}", other),
        }
    }
}
