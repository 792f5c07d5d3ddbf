use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// GitHub API response structures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: GitHubOwner,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
}

/// One element of a `/user/starred` page.
///
/// With the `star+json` media type GitHub wraps every repository in
/// `{"starred_at": ..., "repo": {...}}`; otherwise the element is the
/// repository itself. The presence of the `repo` key is the only thing
/// that decides which variant is produced.
#[derive(Debug, Clone)]
pub enum RawStarItem {
    Envelope {
        repo: GitHubRepo,
        starred_at: Option<String>,
    },
    Bare(GitHubRepo),
}

impl RawStarItem {
    pub fn repo(&self) -> &GitHubRepo {
        match self {
            RawStarItem::Envelope { repo, .. } | RawStarItem::Bare(repo) => repo,
        }
    }

    pub fn into_parts(self) -> (GitHubRepo, Option<String>) {
        match self {
            RawStarItem::Envelope { repo, starred_at } => (repo, starred_at),
            RawStarItem::Bare(repo) => (repo, None),
        }
    }
}

impl<'de> Deserialize<'de> for RawStarItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;

        let wrapped = value.as_object_mut().and_then(|object| object.remove("repo"));
        match wrapped {
            Some(repo) => {
                let repo = GitHubRepo::deserialize(repo).map_err(de::Error::custom)?;
                let starred_at = value
                    .get("starred_at")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                Ok(RawStarItem::Envelope { repo, starred_at })
            }
            None => GitHubRepo::deserialize(value)
                .map(RawStarItem::Bare)
                .map_err(de::Error::custom),
        }
    }
}
