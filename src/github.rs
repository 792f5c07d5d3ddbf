use crate::credential::Credential;
use crate::error::{Result, StarsError};
use crate::models::RateLimitState;
use crate::source::StarSource;
use crate::types::RawStarItem;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const API_VERSION: &str = "2022-11-28";
pub const MAX_PER_PAGE: u32 = 100;

const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";
const DEFAULT_MEDIA_TYPE: &str = "application/vnd.github+json";
const LOW_RATE_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_version: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Ask for `{starred_at, repo}` envelopes instead of bare repositories.
    pub include_starred_at: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            user_agent: concat!("github-stars-manager/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            include_starred_at: true,
        }
    }
}

/// Stateless GitHub REST client for the authenticated user's stars.
///
/// The credential is passed to every call and never kept.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StarsError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(GitHubClient {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `with_config`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn make_request(
        &self,
        method: Method,
        url: Url,
        credential: &Credential,
        accept: &str,
    ) -> Result<Response> {
        let response = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, accept)
            .header(AUTHORIZATION, credential.bearer_header())
            .header("X-GitHub-Api-Version", self.config.api_version.as_str())
            .send()
            .await?;

        let status = response.status();
        debug!(%method, path = url.path(), status = status.as_u16(), "GitHub response");

        if status.is_success() {
            if let Some(state) = rate_limit_state(response.headers()) {
                if state.remaining < LOW_RATE_LIMIT {
                    warn!(
                        remaining = state.remaining,
                        limit = state.limit,
                        reset_time = ?state.reset_time,
                        "GitHub rate limit is running low"
                    );
                }
            }
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &headers, &body, url.path()))
    }

    /// Fetch a page of the authenticated user's starred repositories
    pub async fn fetch_starred_page(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawStarItem>> {
        let mut url = self.endpoint(&["user", "starred"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        let accept = if self.config.include_starred_at {
            STAR_MEDIA_TYPE
        } else {
            DEFAULT_MEDIA_TYPE
        };

        let response = self.make_request(Method::GET, url, credential, accept).await?;
        let body = response.bytes().await?;
        let items: Vec<RawStarItem> = serde_json::from_slice(&body)?;

        debug!(page, per_page, items = items.len(), "Fetched starred page");
        Ok(items)
    }

    pub async fn unstar_repository(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
    ) -> Result<()> {
        validate_repo_part(owner)?;
        validate_repo_part(repo)?;

        let url = self.endpoint(&["user", "starred", owner, repo]);
        match self
            .make_request(Method::DELETE, url, credential, DEFAULT_MEDIA_TYPE)
            .await
        {
            Ok(_) => Ok(()),
            Err(StarsError::NotFound(_)) => Err(StarsError::NotFound(format!(
                "{}/{} is not starred or does not exist",
                owner, repo
            ))),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl StarSource for GitHubClient {
    async fn fetch_page(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawStarItem>> {
        self.fetch_starred_page(credential, page, per_page).await
    }

    async fn unstar(&self, credential: &Credential, owner: &str, repo: &str) -> Result<()> {
        self.unstar_repository(credential, owner, repo).await
    }
}

/// Rate limit state from the `X-RateLimit-*` headers, `None` when absent.
pub fn rate_limit_state(headers: &HeaderMap) -> Option<RateLimitState> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    let remaining = header("X-RateLimit-Remaining")?.parse::<u32>().ok()?;
    let limit = header("X-RateLimit-Limit")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5000);
    let reset_time = header("X-RateLimit-Reset")
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0));

    Some(RateLimitState {
        remaining,
        limit,
        reset_time,
        is_limited: remaining == 0,
    })
}

/// Maps a non-success response onto the error taxonomy.
pub fn error_for_status(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    resource: &str,
) -> StarsError {
    let message = api_message(body);
    let rate_limit = rate_limit_state(headers);
    let exhausted = rate_limit.as_ref().map_or(false, |state| state.is_limited);
    let retry_after = headers
        .get(RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok());

    let rate_limited = |message: String| {
        let reset_at = rate_limit
            .as_ref()
            .and_then(|state| state.reset_time)
            .or_else(|| retry_after.map(|secs| Utc::now() + chrono::Duration::seconds(secs)));
        StarsError::RateLimitExceeded { message, reset_at }
    };

    match status {
        StatusCode::UNAUTHORIZED => StarsError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => rate_limited(message),
        StatusCode::FORBIDDEN if exhausted || retry_after.is_some() => rate_limited(message),
        StatusCode::FORBIDDEN => StarsError::Unauthorized(message),
        StatusCode::NOT_FOUND => StarsError::NotFound(resource.to_string()),
        s if s.is_server_error() => StarsError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => StarsError::ApiError {
            status: s.as_u16(),
            message,
        },
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Splits `owner/name` into its two parts.
pub fn parse_full_name(full_name: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = full_name.trim().split('/').collect();
    if parts.len() != 2 {
        return Err(StarsError::InvalidRepoName(format!(
            "Invalid repository name format: {}",
            full_name
        )));
    }

    validate_repo_part(parts[0])?;
    validate_repo_part(parts[1])?;
    Ok((parts[0], parts[1]))
}

pub fn validate_repo_part(part: &str) -> Result<()> {
    if part.is_empty() || part.contains('/') || part.chars().any(char::is_whitespace) {
        return Err(StarsError::InvalidRepoName(format!("{:?}", part)));
    }
    Ok(())
}
