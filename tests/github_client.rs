use github_stars_manager::github::{ClientConfig, GitHubClient};
use github_stars_manager::types::RawStarItem;
use github_stars_manager::{fetch_all, unstar, CancelFlag, Credential, ErrorKind, FetchOptions, StarsError};
use mockito::Matcher;
use serde_json::json;

fn get_test_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok()
}

fn client_for(server: &mockito::Server, include_starred_at: bool) -> GitHubClient {
    GitHubClient::with_config(ClientConfig {
        api_base_url: server.url(),
        include_starred_at,
        ..ClientConfig::default()
    })
    .expect("Failed to create client")
}

fn repo_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("octocat/{}", name),
        "owner": { "login": "octocat", "avatar_url": "https://avatars.githubusercontent.com/u/583231" },
        "description": null,
        "language": "Rust",
        "stargazers_count": 10,
        "forks_count": 1,
        "updated_at": "2024-06-01T00:00:00Z",
        "pushed_at": "2024-03-01T00:00:00Z",
        "html_url": format!("https://github.com/octocat/{}", name),
        "topics": [],
        "size": 108
    })
}

fn page_query(page: u32, per_page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), per_page.to_string()),
    ])
}

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new();
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_invalid_base_url() {
    let result = GitHubClient::with_config(ClientConfig {
        api_base_url: "not a url".to_string(),
        ..ClientConfig::default()
    });
    assert!(matches!(result, Err(StarsError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_fetch_page_sends_token_and_star_media_type() {
    let mut server = mockito::Server::new_async().await;
    let body = json!([{ "starred_at": "2023-11-05T10:00:00Z", "repo": repo_json(1, "hello-world") }]);

    let mock = server
        .mock("GET", "/user/starred")
        .match_query(page_query(1, 100))
        .match_header("authorization", "Bearer test_token")
        .match_header("accept", "application/vnd.github.star+json")
        .match_header("x-github-api-version", "2022-11-28")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server, true);
    let items = client
        .fetch_starred_page(&Credential::new("test_token"), 1, 100)
        .await
        .expect("Failed to fetch starred page");

    mock.assert_async().await;
    assert_eq!(items.len(), 1);
    match &items[0] {
        RawStarItem::Envelope { repo, starred_at } => {
            assert_eq!(repo.full_name, "octocat/hello-world");
            assert_eq!(starred_at.as_deref(), Some("2023-11-05T10:00:00Z"));
        }
        other => panic!("Expected an envelope, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_all_over_http() {
    let mut server = mockito::Server::new_async().await;

    let first: Vec<_> = (1..=2).map(|id| repo_json(id, &format!("repo-{}", id))).collect();
    let second = vec![repo_json(3, "repo-3")];

    let page_one = server
        .mock("GET", "/user/starred")
        .match_query(page_query(1, 2))
        .match_header("accept", "application/vnd.github+json")
        .with_body(serde_json::Value::Array(first).to_string())
        .create_async()
        .await;
    let page_two = server
        .mock("GET", "/user/starred")
        .match_query(page_query(2, 2))
        .with_body(serde_json::Value::Array(second).to_string())
        .create_async()
        .await;

    let client = client_for(&server, false);
    let options = FetchOptions::default().with_per_page(2);
    let collection = fetch_all(&client, &Credential::new("test_token"), options, &CancelFlag::new())
        .await
        .expect("Failed to fetch stars");

    page_one.assert_async().await;
    page_two.assert_async().await;
    assert_eq!(collection.len(), 3);
    assert!(collection.iter().all(|r| r.starred_at().is_none()));
    assert_eq!(
        collection.get(3).unwrap().effective_updated_at().to_rfc3339(),
        "2024-03-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn test_bad_credentials() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user/starred")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let client = client_for(&server, true);
    let err = client
        .fetch_starred_page(&Credential::new("expired"), 1, 100)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.to_string(), "Unauthorized: Bad credentials");
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user/starred")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("x-ratelimit-remaining", "0")
        .with_header("x-ratelimit-limit", "5000")
        .with_header("x-ratelimit-reset", "1893456000")
        .with_body(r#"{"message":"API rate limit exceeded"}"#)
        .create_async()
        .await;

    let client = client_for(&server, true);
    let err = client
        .fetch_starred_page(&Credential::new("test_token"), 1, 100)
        .await
        .unwrap_err();

    match err {
        StarsError::RateLimitExceeded { reset_at, .. } => {
            assert_eq!(reset_at.map(|t| t.timestamp()), Some(1893456000));
        }
        other => panic!("Expected RateLimitExceeded error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user/starred")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, true);
    let err = fetch_all(&client, &Credential::new("test_token"), FetchOptions::default(), &CancelFlag::new())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Transient);
}

#[tokio::test]
async fn test_unexpected_body_is_a_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user/starred")
        .match_query(Matcher::Any)
        .with_body(r#"{"not":"a list"}"#)
        .create_async()
        .await;

    let client = client_for(&server, true);
    let err = client
        .fetch_starred_page(&Credential::new("test_token"), 1, 100)
        .await
        .unwrap_err();

    assert!(matches!(err, StarsError::Json(_)));
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_unstar_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/user/starred/octocat/hello-world")
        .match_header("authorization", "Bearer test_token")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, true);
    unstar(&client, &Credential::new("test_token"), "octocat", "hello-world")
        .await
        .expect("Failed to unstar");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unstar_not_starred() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/user/starred/nonexistent/repository")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let client = client_for(&server, true);
    let result = unstar(&client, &Credential::new("test_token"), "nonexistent", "repository").await;

    match result.unwrap_err() {
        StarsError::NotFound(message) => {
            assert_eq!(message, "nonexistent/repository is not starred or does not exist");
        }
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_fetch_real_stars() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new().expect("Failed to create client");

    let collection = fetch_all(&client, &Credential::new(token), FetchOptions::default(), &CancelFlag::new())
        .await
        .expect("Failed to fetch stars");

    println!("Fetched {} starred repositories", collection.len());

    let mut seen_ids = std::collections::HashSet::new();
    for record in &collection {
        assert!(seen_ids.insert(record.id()), "Found duplicate repository ID: {}", record.id());
        assert!(!record.full_name().is_empty());
        assert!(record.starred_at().is_some());
    }
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_unstar_unknown_repository() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new().expect("Failed to create client");

    let err = unstar(&client, &Credential::new(token), "nonexistent-owner-4f1c", "nonexistent-repo")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
