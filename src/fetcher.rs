//! Drains the paginated starred listing into one [`Collection`].
//!
//! Pages are requested one after another starting at 1. A page shorter than
//! the requested size (an empty page included) ends the listing. Any failure
//! aborts the whole fetch and nothing fetched so far is returned.

use crate::cancel::CancelFlag;
use crate::credential::Credential;
use crate::error::{Result, StarsError};
use crate::github::MAX_PER_PAGE;
use crate::models::{Collection, RepositoryRecord};
use crate::source::StarSource;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Requested page size, clamped to `1..=100`.
    pub per_page: u32,
    /// Optional ceiling on the number of page requests.
    pub max_pages: Option<u32>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: None,
        }
    }
}

impl FetchOptions {
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn page_size(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

/// Fetches every starred repository of the credential's owner.
pub async fn fetch_all<S>(
    source: &S,
    credential: &Credential,
    options: FetchOptions,
    cancel: &CancelFlag,
) -> Result<Collection>
where
    S: StarSource + ?Sized,
{
    let per_page = options.page_size();
    let mut records: Vec<RepositoryRecord> = Vec::new();
    let mut page = 1u32;

    loop {
        let pages_fetched = page - 1;

        if cancel.is_cancelled() {
            warn!(pages_fetched, "Starred fetch cancelled, discarding partial results");
            return Err(StarsError::Cancelled { pages_fetched });
        }

        if let Some(limit) = options.max_pages {
            if pages_fetched >= limit {
                warn!(limit, "Starred listing did not end within the page limit");
                return Err(StarsError::TooManyPages { limit });
            }
        }

        let items = source.fetch_page(credential, page, per_page).await?;
        let received = items.len();

        for item in items {
            let (repo, starred_at) = item.into_parts();
            records.push(RepositoryRecord::from_remote(repo, starred_at.as_deref())?);
        }

        debug!(page, received, total = records.len(), "Processed starred page");

        if received < per_page as usize {
            break;
        }
        page += 1;
    }

    let collection = Collection::from_records(records);
    info!(repositories = collection.len(), pages = page, "Fetched starred collection");
    Ok(collection)
}
