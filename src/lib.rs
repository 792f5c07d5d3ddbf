pub mod cancel;
pub mod cli;
pub mod credential;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod models;
pub mod mutation;
pub mod normalize;
pub mod query;
pub mod source;
pub mod types;

pub use cancel::CancelFlag;
pub use credential::Credential;
pub use error::{ErrorKind, Result, StarsError};
pub use fetcher::{fetch_all, FetchOptions};
pub use github::{ClientConfig, GitHubClient};
pub use models::{Collection, RepositoryOwner, RepositoryRecord};
pub use mutation::unstar;
pub use query::{query, QueryState, SortField, SortOrder};
pub use source::StarSource;
