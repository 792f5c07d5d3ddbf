//! Resolves the single "last activity" instant of a repository.
//!
//! GitHub reports two competing times: `pushed_at` (last code push) and
//! `updated_at` (last change to any repository metadata, star count
//! included). The push time is preferred whenever it is present.

use crate::error::{Result, StarsError};
use crate::types::GitHubRepo;
use chrono::{DateTime, NaiveDate, Utc};

/// Parses an upstream timestamp. Empty or unparseable input yields `None`.
///
/// RFC 3339 is what GitHub sends; a bare `YYYY-MM-DD` date is accepted as
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn effective_updated_at(
    last_pushed_at: Option<DateTime<Utc>>,
    last_updated_at: DateTime<Utc>,
) -> DateTime<Utc> {
    last_pushed_at.unwrap_or(last_updated_at)
}

/// Parsed `(pushed_at, updated_at)` pair of a wire repository.
///
/// A missing `updated_at` means the remote broke its contract.
pub fn source_times(repo: &GitHubRepo) -> Result<(Option<DateTime<Utc>>, DateTime<Utc>)> {
    let pushed = repo.pushed_at.as_deref().and_then(parse_timestamp);

    let updated = repo
        .updated_at
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| {
            StarsError::MalformedPayload(format!(
                "repository {} has no usable updated_at ({:?})",
                repo.full_name, repo.updated_at
            ))
        })?;

    Ok((pushed, updated))
}

/// Effective last-activity time of a wire repository.
pub fn normalize(repo: &GitHubRepo) -> Result<DateTime<Utc>> {
    let (pushed, updated) = source_times(repo)?;
    Ok(effective_updated_at(pushed, updated))
}
