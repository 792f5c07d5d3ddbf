#![allow(dead_code)]

use async_trait::async_trait;
use github_stars_manager::types::{GitHubOwner, GitHubRepo, RawStarItem};
use github_stars_manager::{CancelFlag, Collection, Credential, RepositoryRecord, StarSource, StarsError};
use std::sync::Mutex;

pub fn repo(id: u64, owner: &str, name: &str) -> GitHubRepo {
    GitHubRepo {
        id,
        name: name.to_string(),
        full_name: format!("{}/{}", owner, name),
        owner: GitHubOwner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
        },
        description: None,
        language: None,
        stargazers_count: 0,
        forks_count: 0,
        updated_at: Some("2024-06-01T00:00:00Z".to_string()),
        pushed_at: None,
        html_url: format!("https://github.com/{}/{}", owner, name),
        topics: vec![],
        size: 0,
    }
}

pub fn record(repo: GitHubRepo) -> RepositoryRecord {
    RepositoryRecord::from_remote(repo, None).expect("test repository has a valid updated_at")
}

pub fn collection(repos: Vec<GitHubRepo>) -> Collection {
    Collection::from_records(repos.into_iter().map(record).collect())
}

/// `count` bare items with ids starting at `first_id`.
pub fn page_of(first_id: u64, count: usize) -> Vec<RawStarItem> {
    (0..count as u64)
        .map(|i| {
            let id = first_id + i;
            RawStarItem::Bare(repo(id, "owner", &format!("repo-{}", id)))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unauthorized,
    RateLimited,
    Server,
    NotFound,
}

impl Failure {
    fn to_error(self) -> StarsError {
        match self {
            Failure::Unauthorized => StarsError::Unauthorized("Bad credentials".to_string()),
            Failure::RateLimited => StarsError::RateLimitExceeded {
                message: "API rate limit exceeded".to_string(),
                reset_at: None,
            },
            Failure::Server => StarsError::ServerError {
                status: 502,
                message: "Bad Gateway".to_string(),
            },
            Failure::NotFound => StarsError::NotFound("/user/starred/owner/repo".to_string()),
        }
    }
}

pub enum Page {
    Items(Vec<RawStarItem>),
    Fail(Failure),
}

/// Scripted stand-in for the GitHub API. Pages past the script are empty.
#[derive(Default)]
pub struct FakeSource {
    pages: Vec<Page>,
    unstar_failure: Option<Failure>,
    cancel_after: Option<(u32, CancelFlag)>,
    pub page_requests: Mutex<Vec<(u32, u32)>>,
    pub unstar_requests: Mutex<Vec<(String, String)>>,
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Pages of the given sizes with consecutive ids.
    pub fn with_page_sizes(sizes: &[usize]) -> Self {
        let mut next_id = 1;
        let pages = sizes
            .iter()
            .map(|&size| {
                let page = page_of(next_id, size);
                next_id += size as u64;
                Page::Items(page)
            })
            .collect();
        Self::with_pages(pages)
    }

    pub fn failing_unstar(mut self, failure: Failure) -> Self {
        self.unstar_failure = Some(failure);
        self
    }

    /// Trips `flag` once page `page` has been served.
    pub fn cancel_after(mut self, page: u32, flag: CancelFlag) -> Self {
        self.cancel_after = Some((page, flag));
        self
    }

    pub fn page_request_count(&self) -> usize {
        self.page_requests.lock().unwrap().len()
    }

    pub fn unstar_request_count(&self) -> usize {
        self.unstar_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl StarSource for FakeSource {
    async fn fetch_page(
        &self,
        _credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> github_stars_manager::Result<Vec<RawStarItem>> {
        self.page_requests.lock().unwrap().push((page, per_page));

        if let Some((after, flag)) = &self.cancel_after {
            if page == *after {
                flag.cancel();
            }
        }

        match self.pages.get(page as usize - 1) {
            Some(Page::Items(items)) => Ok(items.clone()),
            Some(Page::Fail(failure)) => Err(failure.to_error()),
            None => Ok(Vec::new()),
        }
    }

    async fn unstar(
        &self,
        _credential: &Credential,
        owner: &str,
        repo: &str,
    ) -> github_stars_manager::Result<()> {
        self.unstar_requests
            .lock()
            .unwrap()
            .push((owner.to_string(), repo.to_string()));

        match self.unstar_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

pub fn credential() -> Credential {
    Credential::new("test_token")
}
