use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarsError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },

    #[error("GitHub server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Page limit of {limit} reached before the starred list ended")]
    TooManyPages { limit: u32 },

    #[error("Fetch cancelled after {pages_fetched} page(s)")]
    Cancelled { pages_fetched: u32 },

    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid repository name: {0}")]
    InvalidRepoName(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Coarse classification of a [`StarsError`], one per failure the caller
/// reacts to differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential rejected; the caller should re-authenticate.
    Auth,
    /// Remote quota exhausted; retry after the reset instant.
    RateLimit,
    /// Network or server fault; the whole operation was aborted.
    Transient,
    /// Mutation target absent.
    NotFound,
    /// The external page ceiling was hit.
    TooManyPages,
    /// The caller's cancellation signal was observed.
    Cancelled,
    /// Arguments rejected before any remote call was made.
    InvalidInput,
    /// The remote answered with something this crate does not understand.
    Protocol,
}

impl StarsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StarsError::Unauthorized(_) => ErrorKind::Auth,
            StarsError::RateLimitExceeded { .. } => ErrorKind::RateLimit,
            StarsError::ServerError { .. } | StarsError::Network(_) => ErrorKind::Transient,
            StarsError::NotFound(_) => ErrorKind::NotFound,
            StarsError::TooManyPages { .. } => ErrorKind::TooManyPages,
            StarsError::Cancelled { .. } => ErrorKind::Cancelled,
            StarsError::InvalidRepoName(_) | StarsError::InvalidUrl(_) => ErrorKind::InvalidInput,
            StarsError::ApiError { .. }
            | StarsError::MalformedPayload(_)
            | StarsError::Json(_) => ErrorKind::Protocol,
        }
    }

    /// True when repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::RateLimit | ErrorKind::Transient)
    }
}

pub type Result<T> = std::result::Result<T, StarsError>;
