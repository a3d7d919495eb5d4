pub mod config;
pub mod jobs;

pub use jobs::client::FeedClient;
pub use jobs::error::FeedError;
pub use jobs::query::{JobStatus, JobType, Order, RecentJobsQuery, FROM_DATE_FORMAT};
pub use jobs::transport::{HttpTransport, Transport, TransportResponse};
pub use jobs::types::{Job, Preset, RecentJobs};
