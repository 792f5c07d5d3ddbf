use crate::credential::Credential;
use crate::error::{Result, StarsError};
use crate::github::validate_repo_part;
use crate::source::StarSource;
use tracing::{info, warn};

/// Removes the user's star from `owner/repo` with exactly one remote call.
///
/// No local [`crate::models::Collection`] is touched. After `Ok(())` the
/// caller either re-fetches or calls `Collection::remove` itself.
/// `NotFound` means the repository was not starred (or does not exist) and
/// can usually be treated as already done.
pub async fn unstar<S>(source: &S, credential: &Credential, owner: &str, repo: &str) -> Result<()>
where
    S: StarSource + ?Sized,
{
    validate_repo_part(owner)?;
    validate_repo_part(repo)?;

    match source.unstar(credential, owner, repo).await {
        Ok(()) => {
            info!(owner, repo, "Unstarred repository");
            Ok(())
        }
        Err(e @ StarsError::NotFound(_)) => {
            info!(owner, repo, "Repository was not starred");
            Err(e)
        }
        Err(e) => {
            warn!(owner, repo, error = %e, "Unstar failed");
            Err(e)
        }
    }
}
