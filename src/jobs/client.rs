use super::error::FeedError;
use super::query::{JobStatus, JobType, Order, RecentJobsQuery};
use super::transport::Transport;
use super::types::{Job, Preset, RecentJobs};
use super::RECENT_JOBS_PATH;
use chrono::Utc;
use reqwest::StatusCode;
use url::Url;

const PRESET_AMOUNT: u32 = 50;

pub struct FeedClient<T> {
    transport: T,
    endpoint: Url,
}

impl<T: Transport> FeedClient<T> {
    /// Fails with `RequestConstruction` when `base_url` is not an absolute URL.
    pub fn new(transport: T, base_url: &str) -> Result<Self, FeedError> {
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            transport,
            endpoint: base.join(RECENT_JOBS_PATH)?,
        })
    }

    fn recent_jobs_url(&self, query: &RecentJobsQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }

    /// Fetch one page of the recent-jobs listing.
    ///
    /// An unpinned `new` query comes back with its cursor set to the moment the
    /// request went out, so it can be handed straight to `next_page`.
    pub async fn recent_jobs(&self, query: &RecentJobsQuery) -> Result<RecentJobs, FeedError> {
        let url = self.recent_jobs_url(query);
        tracing::debug!(%url, "fetching recent jobs");

        let request_time = Utc::now();
        let resp = self.transport.get(url).await.map_err(FeedError::Transport)?;
        if resp.status != StatusCode::OK {
            return Err(FeedError::ResponseStatus(resp.status));
        }

        let jobs: Vec<Job> = serde_json::from_slice(&resp.body)?;
        drop(resp);

        let mut page = RecentJobs {
            query: query.clone(),
            jobs,
            page: query.page,
        };
        if query.needs_cursor() {
            tracing::debug!(cursor = %request_time, "pinned new-order cursor");
            page.query.from_date = Some(request_time);
        }
        tracing::debug!(jobs = page.jobs.len(), page = page.page, "decoded recent jobs");
        Ok(page)
    }

    /// Fetch the page following `prev`.
    pub async fn next_page(&self, prev: &RecentJobs) -> Result<RecentJobs, FeedError> {
        self.recent_jobs(&prev.next_query()).await
    }

    pub async fn home(&self, user_id: &str) -> Result<RecentJobs, FeedError> {
        if user_id.is_empty() {
            return Err(FeedError::MissingUserId);
        }
        self.recent_jobs(&RecentJobsQuery {
            amount: PRESET_AMOUNT,
            job_type: Some(JobType::Null),
            order_by: Some(Order::New),
            job_status: Some(JobStatus::Completed),
            user_id: user_id.to_string(),
            dedupe: true,
            ..Default::default()
        })
        .await
    }

    pub async fn community_feed(&self) -> Result<RecentJobs, FeedError> {
        self.recent_jobs(&RecentJobsQuery {
            amount: PRESET_AMOUNT,
            job_type: Some(JobType::Upscale),
            order_by: Some(Order::Hot),
            job_status: Some(JobStatus::Completed),
            dedupe: true,
            ..Default::default()
        })
        .await
    }

    pub async fn personal_feed(&self) -> Result<RecentJobs, FeedError> {
        self.recent_jobs(&RecentJobsQuery {
            amount: PRESET_AMOUNT,
            job_type: Some(JobType::Upscale),
            order_by: Some(Order::New),
            job_status: Some(JobStatus::Completed),
            personal: true,
            dedupe: true,
            ..Default::default()
        })
        .await
    }

    pub async fn bookmarks(&self, user_id: &str) -> Result<RecentJobs, FeedError> {
        if user_id.is_empty() {
            return Err(FeedError::MissingUserId);
        }
        self.recent_jobs(&RecentJobsQuery {
            amount: PRESET_AMOUNT,
            job_type: Some(JobType::Null),
            order_by: Some(Order::LikedTime),
            job_status: Some(JobStatus::Completed),
            user_id_liked: user_id.to_string(),
            dedupe: true,
            ..Default::default()
        })
        .await
    }

    /// Dispatch to the named preset. `user_id` is ignored by presets that
    /// don't need one.
    pub async fn preset(&self, preset: Preset, user_id: &str) -> Result<RecentJobs, FeedError> {
        match preset {
            Preset::Home => self.home(user_id).await,
            Preset::Community => self.community_feed().await,
            Preset::Personal => self.personal_feed().await,
            Preset::Bookmarks => self.bookmarks(user_id).await,
        }
    }
}
