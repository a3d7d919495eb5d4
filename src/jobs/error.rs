use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("user id required")]
    MissingUserId,

    #[error("invalid recent jobs request url: {0}")]
    RequestConstruction(#[from] url::ParseError),

    #[error("unexpected response status: {0}")]
    ResponseStatus(StatusCode),

    #[error("failed to decode recent jobs: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by the transport, passed through as-is.
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl FeedError {
    /// Network, cancellation or auth failures; the only kind worth retrying.
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport(_))
    }
}
