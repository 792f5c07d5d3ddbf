use crate::credential::Credential;
use crate::error::Result;
use crate::types::RawStarItem;
use async_trait::async_trait;

/// Remote holder of a user's stars.
///
/// [`crate::github::GitHubClient`] talks to the real API; tests plug in
/// scripted fakes. One call is one remote request, implementations must not
/// retry.
#[async_trait]
pub trait StarSource: Send + Sync {
    /// One page of the starred listing, `page` is 1-based.
    async fn fetch_page(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawStarItem>>;

    /// Removes the star from `owner/repo`.
    async fn unstar(&self, credential: &Credential, owner: &str, repo: &str) -> Result<()>;
}
