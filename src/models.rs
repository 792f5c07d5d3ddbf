use crate::error::Result;
use crate::normalize;
use crate::types::GitHubRepo;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Repository owner as shown next to a starred repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryOwner {
    pub login: String,
    pub avatar_url: String,
}

/// One starred repository as known locally.
///
/// Built only through [`RepositoryRecord::from_remote`], which derives
/// `effective_updated_at` from the two source timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    id: u64,
    name: String,
    full_name: String,
    owner: RepositoryOwner,
    description: Option<String>,
    language: Option<String>,
    topics: Vec<String>,
    size_kb: u64,
    star_count: u32,
    fork_count: u32,
    last_pushed_at: Option<DateTime<Utc>>,
    last_updated_at: DateTime<Utc>,
    effective_updated_at: DateTime<Utc>,
    starred_at: Option<DateTime<Utc>>,
    html_url: String,
}

impl RepositoryRecord {
    pub fn from_remote(repo: GitHubRepo, starred_at: Option<&str>) -> Result<Self> {
        let (last_pushed_at, last_updated_at) = normalize::source_times(&repo)?;

        Ok(RepositoryRecord {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            owner: RepositoryOwner {
                login: repo.owner.login,
                avatar_url: repo.owner.avatar_url,
            },
            description: repo.description,
            language: repo.language,
            topics: repo.topics,
            size_kb: repo.size,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            last_pushed_at,
            last_updated_at,
            effective_updated_at: normalize::effective_updated_at(last_pushed_at, last_updated_at),
            starred_at: starred_at.and_then(normalize::parse_timestamp),
            html_url: repo.html_url,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn size_kb(&self) -> u64 {
        self.size_kb
    }

    pub fn star_count(&self) -> u32 {
        self.star_count
    }

    pub fn fork_count(&self) -> u32 {
        self.fork_count
    }

    pub fn last_pushed_at(&self) -> Option<DateTime<Utc>> {
        self.last_pushed_at
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    /// Push time if known, otherwise the metadata update time.
    pub fn effective_updated_at(&self) -> DateTime<Utc> {
        self.effective_updated_at
    }

    /// Only known when the listing was fetched with the star media type.
    pub fn starred_at(&self) -> Option<DateTime<Utc>> {
        self.starred_at
    }

    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}

/// The user's full set of starred repositories as of the last fetch.
///
/// Replaced wholesale by every fetch. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<RepositoryRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first record seen for every id.
    pub fn from_records(records: Vec<RepositoryRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.id) {
                unique.push(record);
            } else {
                warn!(
                    id = record.id,
                    full_name = %record.full_name,
                    "Dropping duplicate repository returned by a later page"
                );
            }
        }

        Collection { records: unique }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: u64) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_full_name(&self, full_name: &str) -> Option<&RepositoryRecord> {
        self.records
            .iter()
            .find(|r| r.full_name.eq_ignore_ascii_case(full_name))
    }

    /// Local removal after a confirmed unstar.
    pub fn remove(&mut self, id: u64) -> Option<RepositoryRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn into_records(self) -> Vec<RepositoryRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a RepositoryRecord;
    type IntoIter = std::slice::Iter<'a, RepositoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Rate limit headers of the last GitHub response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: Option<DateTime<Utc>>,
    pub is_limited: bool,
}
