use chrono::{DateTime, Utc};

/// Wire format of the `fromDate` cursor. Always six fractional digits, UTC.
pub const FROM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Hot,
    New,
    Oldest,
    TopToday,
    TopWeekly,
    TopMonth,
    TopAll,
    LikedTime,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Hot => "hot",
            Order::New => "new",
            Order::Oldest => "oldest",
            Order::TopToday => "top-today",
            Order::TopWeekly => "top-weekly",
            Order::TopMonth => "top-month",
            Order::TopAll => "top-all",
            Order::LikedTime => "liked_timestamp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Matches jobs of any type; sent explicitly as `null`.
    Null,
    Grid,
    Upscale,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Null => "null",
            JobType::Grid => "grid",
            JobType::Upscale => "upscale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Completed,
    Running,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Running => "running",
            JobStatus::Failed => "failed",
        }
    }
}

/// Filter, ordering and pagination state for one recent-jobs request.
///
/// Zero numbers, empty strings, `None` and `false` all mean "let the server
/// decide" and are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentJobsQuery {
    pub amount: u32,
    pub job_type: Option<JobType>,
    pub order_by: Option<Order>,
    pub job_status: Option<JobStatus>,
    pub user_id: String,
    pub user_id_liked: String,
    /// Upper time bound for `new` ordering.
    pub from_date: Option<DateTime<Utc>>,
    /// 1-based; 0 means first page.
    pub page: u32,
    pub prompt: String,
    pub personal: bool,
    pub dedupe: bool,
    pub refresh_api: u32,
}

impl RecentJobsQuery {
    /// Wire parameters in a stable order. `refreshApi` is always present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut v = Vec::with_capacity(12);
        if self.amount != 0 {
            v.push(("amount", self.amount.to_string()));
        }
        if let Some(job_type) = self.job_type {
            v.push(("jobType", job_type.as_str().to_string()));
        }
        if let Some(order) = self.order_by {
            v.push(("orderBy", order.as_str().to_string()));
        }
        if let Some(status) = self.job_status {
            v.push(("jobStatus", status.as_str().to_string()));
        }
        if !self.user_id.is_empty() {
            v.push(("userId", self.user_id.clone()));
        }
        if !self.user_id_liked.is_empty() {
            v.push(("userIdLiked", self.user_id_liked.clone()));
        }
        if let Some(from) = self.from_date {
            v.push(("fromDate", from.format(FROM_DATE_FORMAT).to_string()));
        }
        if self.page != 0 {
            v.push(("page", self.page.to_string()));
        }
        if !self.prompt.is_empty() {
            v.push(("prompt", self.prompt.clone()));
        }
        if self.personal {
            v.push(("personal", "true".to_string()));
        }
        if self.dedupe {
            v.push(("dedupe", "true".to_string()));
        }
        v.push(("refreshApi", self.refresh_api.to_string()));
        v
    }

    /// Form-urlencoded `params()`, without the leading `?`.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish()
    }

    /// True when the cursor still has to be pinned before paging.
    pub(crate) fn needs_cursor(&self) -> bool {
        self.order_by == Some(Order::New) && self.from_date.is_none()
    }

    /// Query for the following page, pinning the cursor to the current time
    /// if this is an unpinned `new` feed.
    pub fn next_page(&self) -> RecentJobsQuery {
        self.next_page_at(Utc::now())
    }

    /// Same as [`next_page`](Self::next_page) with an explicit clock reading.
    pub fn next_page_at(&self, now: DateTime<Utc>) -> RecentJobsQuery {
        let mut q = self.clone();
        if q.needs_cursor() {
            q.from_date = Some(now);
        }
        let current = if self.page == 0 { 1 } else { self.page };
        q.page = current.saturating_add(1);
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime, SubsecRound, TimeZone};

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_query_only_sends_refresh() {
        let params = RecentJobsQuery::default().params();
        assert_eq!(params, vec![("refreshApi", "0".to_string())]);
    }

    #[test]
    fn test_zero_numbers_omitted() {
        let q = RecentJobsQuery { amount: 0, page: 0, ..Default::default() };
        let params = q.params();
        assert!(param(&params, "amount").is_none());
        assert!(param(&params, "page").is_none());

        let q = RecentJobsQuery { amount: 50, page: 3, ..Default::default() };
        let params = q.params();
        assert_eq!(param(&params, "amount"), Some("50"));
        assert_eq!(param(&params, "page"), Some("3"));
    }

    #[test]
    fn test_booleans_presence_only() {
        let off = RecentJobsQuery::default().params();
        assert!(param(&off, "personal").is_none());
        assert!(param(&off, "dedupe").is_none());
        assert!(off.iter().all(|(_, v)| v != "false"));

        let on = RecentJobsQuery { personal: true, dedupe: true, ..Default::default() }.params();
        assert_eq!(param(&on, "personal"), Some("true"));
        assert_eq!(param(&on, "dedupe"), Some("true"));
    }

    #[test]
    fn test_refresh_counter_always_present() {
        for refresh in [0, 1, 42] {
            let q = RecentJobsQuery { refresh_api: refresh, ..Default::default() };
            assert_eq!(param(&q.params(), "refreshApi"), Some(refresh.to_string().as_str()));
        }
    }

    #[test]
    fn test_string_and_enum_fields() {
        let q = RecentJobsQuery {
            job_type: Some(JobType::Null),
            order_by: Some(Order::LikedTime),
            job_status: Some(JobStatus::Completed),
            user_id: "u1".to_string(),
            user_id_liked: "u2".to_string(),
            prompt: "red fox".to_string(),
            ..Default::default()
        };
        let params = q.params();
        assert_eq!(param(&params, "jobType"), Some("null"));
        assert_eq!(param(&params, "orderBy"), Some("liked_timestamp"));
        assert_eq!(param(&params, "jobStatus"), Some("completed"));
        assert_eq!(param(&params, "userId"), Some("u1"));
        assert_eq!(param(&params, "userIdLiked"), Some("u2"));
        assert_eq!(param(&params, "prompt"), Some("red fox"));
    }

    #[test]
    fn test_from_date_fixed_six_digit_fraction() {
        let ts = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        let q = RecentJobsQuery { from_date: Some(ts), ..Default::default() };
        assert_eq!(param(&q.params(), "fromDate"), Some("2023-04-05 06:07:08.000000"));
    }

    #[test]
    fn test_from_date_round_trip_microseconds() {
        let ts = Utc::now().trunc_subsecs(6);
        let q = RecentJobsQuery { from_date: Some(ts), ..Default::default() };
        let params = q.params();
        let wire = param(&params, "fromDate").unwrap();
        let parsed = NaiveDateTime::parse_from_str(wire, FROM_DATE_FORMAT).unwrap().and_utc();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn test_query_string_encodes_spaces() {
        let q = RecentJobsQuery { prompt: "a cat".to_string(), ..Default::default() };
        assert_eq!(q.query_string(), "prompt=a+cat&refreshApi=0");
    }

    #[test]
    fn test_next_page_from_unset() {
        let q = RecentJobsQuery::default();
        assert_eq!(q.next_page().page, 2);
    }

    #[test]
    fn test_next_page_monotonic() {
        for page in [0, 1, 2, 9] {
            let q = RecentJobsQuery { page, ..Default::default() };
            let once = q.next_page();
            let twice = once.next_page();
            assert_eq!(twice.page, once.page + 1);
        }
        let q = RecentJobsQuery { page: 5, ..Default::default() };
        assert_eq!(q.next_page().page, 6);
    }

    #[test]
    fn test_next_page_at_max_page() {
        let q = RecentJobsQuery { page: u32::MAX, ..Default::default() };
        assert_eq!(q.next_page().page, u32::MAX);
    }

    #[test]
    fn test_next_page_leaves_input_untouched() {
        let q = RecentJobsQuery { order_by: Some(Order::New), ..Default::default() };
        let _ = q.next_page();
        assert_eq!(q.page, 0);
        assert!(q.from_date.is_none());
    }

    #[test]
    fn test_new_order_pins_cursor() {
        let q = RecentJobsQuery { order_by: Some(Order::New), ..Default::default() };
        let before = Utc::now();
        let next = q.next_page();
        let after = Utc::now();
        let cursor = next.from_date.unwrap();
        assert!(cursor >= before && cursor <= after);

        let later = next.next_page_at(cursor + Duration::seconds(30));
        assert_eq!(later.from_date, Some(cursor));
    }

    #[test]
    fn test_other_orders_leave_cursor_unset() {
        for order in [Order::Hot, Order::Oldest, Order::TopAll, Order::LikedTime] {
            let q = RecentJobsQuery { order_by: Some(order), ..Default::default() };
            assert!(q.next_page().from_date.is_none());
        }
    }

    #[test]
    fn test_next_page_copies_filters() {
        let q = RecentJobsQuery {
            amount: 50,
            job_type: Some(JobType::Upscale),
            order_by: Some(Order::Hot),
            prompt: "castle".to_string(),
            dedupe: true,
            refresh_api: 7,
            ..Default::default()
        };
        let next = q.next_page();
        assert_eq!(next, RecentJobsQuery { page: 2, ..q });
    }
}
