use anyhow::Context;
use clap::Parser;
use colored::*;
use github_stars_manager::cli::{Cli, Command};
use github_stars_manager::display::{language_color, paginate, relative_age_now};
use github_stars_manager::github::parse_full_name;
use github_stars_manager::{
    fetch_all, query, unstar, CancelFlag, ClientConfig, Credential, ErrorKind, FetchOptions,
    GitHubClient, QueryState, RepositoryRecord,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = GitHubClient::with_config(ClientConfig {
        api_base_url: cli.api_url.clone(),
        api_version: cli.api_version.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    })
    .context("Failed to build GitHub client")?;
    let credential = Credential::new(cli.token.clone());

    match cli.command {
        Command::List {
            ref search,
            sort,
            order,
            page,
            page_size,
        } => {
            let options = FetchOptions::default()
                .with_per_page(cli.per_page)
                .with_max_pages(cli.max_pages);

            let cancel = CancelFlag::new();
            let on_ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    eprintln!("\n🛑 Cancelling after the current page...");
                    on_ctrl_c.cancel();
                }
            });

            eprintln!("{}", "Fetching starred repositories...".dimmed());
            let collection = match fetch_all(&client, &credential, options, &cancel).await {
                Ok(collection) => collection,
                Err(e) if e.kind() == ErrorKind::Auth => {
                    anyhow::bail!("GitHub rejected the token, please sign in again: {}", e)
                }
                Err(e) if e.is_retryable() => {
                    anyhow::bail!("Could not load stars, try again later: {}", e)
                }
                Err(e) => return Err(e.into()),
            };

            let state = QueryState::new(search.as_str(), sort, order);
            let results = query(&collection, &state);
            let window = paginate(&results, page, page_size);

            println!(
                "{} ({} starred, sorted by {} {})",
                "My Stars".bold().green(),
                collection.len(),
                sort,
                order
            );
            println!("{}", "=".repeat(50).dimmed());

            if !state.search_term.is_empty() {
                println!("Found {} matching repositories\n", results.len().to_string().bold());
            }

            if window.items.is_empty() {
                println!("{}", "No repositories to show.".yellow());
            }
            for record in window.items {
                print_record(record);
            }

            if window.total_pages > 1 {
                println!(
                    "\n{}",
                    format!("Page {} of {}", window.page, window.total_pages).dimmed()
                );
            }
        }
        Command::Unstar { ref full_name } => {
            let (owner, repo) = parse_full_name(full_name)?;

            match unstar(&client, &credential, owner, repo).await {
                Ok(()) => println!("✅ Unstarred {}", full_name.bold()),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    println!("{} {} was not starred", "ℹ".blue(), full_name.bold())
                }
                Err(e) => return Err(e).with_context(|| format!("Failed to unstar {}", full_name)),
            }
        }
    }

    Ok(())
}

fn print_record(record: &RepositoryRecord) {
    let language = match record.language() {
        Some(name) => {
            let hex = language_color(Some(name));
            match hex_to_rgb(hex) {
                Some((r, g, b)) => format!("● {}", name).truecolor(r, g, b).to_string(),
                None => name.to_string(),
            }
        }
        None => String::new(),
    };

    println!(
        "{}  ★ {}  ⑂ {}  {}  {}",
        record.full_name().bold(),
        record.star_count().to_string().yellow(),
        record.fork_count(),
        language,
        format!("updated {}", relative_age_now(record.effective_updated_at())).dimmed()
    );
    if let Some(description) = record.description() {
        println!("    {}", description);
    }
    println!("    {}", record.html_url().dimmed());
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
