use crate::display::DEFAULT_PAGE_SIZE;
use crate::github::{API_BASE_URL, API_VERSION, MAX_PER_PAGE};
use crate::query::{SortField, SortOrder};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "github-stars-manager")]
#[command(about = "Browse, search, sort and unstar the repositories you starred on GitHub")]
#[command(version)]
pub struct Cli {
    /// GitHub access token of the user whose stars are managed
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Value sent in the X-GitHub-Api-Version header
    #[arg(long, env = "GITHUB_API_VERSION", default_value = API_VERSION)]
    pub api_version: String,

    /// HTTP timeout in seconds
    #[arg(long, env = "GITHUB_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Repositories requested per API page (1-100)
    #[arg(long, default_value_t = MAX_PER_PAGE)]
    pub per_page: u32,

    /// Give up if the starred listing has not ended after this many pages
    #[arg(long, env = "STARS_MAX_PAGES")]
    pub max_pages: Option<u32>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List starred repositories
    List {
        /// Case-insensitive text matched against name, description and language
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort by `stars` or `updated`
        #[arg(long, default_value_t = SortField::StarCount)]
        sort: SortField,

        /// `asc` or `desc`
        #[arg(long, default_value_t = SortOrder::Descending)]
        order: SortOrder,

        /// Page of the result to print (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results printed per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Remove the star from a repository
    Unstar {
        /// Repository as `owner/name`
        full_name: String,
    },
}
