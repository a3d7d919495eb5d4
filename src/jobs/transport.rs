use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Authenticated HTTP capability the feed client sits on. Implementations own
/// auth, connection reuse, timeouts and any retry policy.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<TransportResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(
        session_token: Option<&str>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = session_token {
            let cookie = format!("__Secure-next-auth.session-token={}", token);
            headers.insert(
                COOKIE,
                HeaderValue::from_str(&cookie).context("session token is not a valid header value")?,
            );
        }
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<TransportResponse> {
        let resp = self.client.get(url).send().await.context("GET recent jobs failed")?;
        let status = resp.status();
        let body = resp.bytes().await.context("failed to read response body")?;
        Ok(TransportResponse { status, body: body.to_vec() })
    }
}
