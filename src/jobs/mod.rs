pub mod client;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

/// Path of the recent-jobs listing, relative to the API base URL.
pub const RECENT_JOBS_PATH: &str = "app/recent-jobs/";
