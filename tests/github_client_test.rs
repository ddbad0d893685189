use httpmock::prelude::*;
use milestone_board::models::{IssueState, RepoSlug};
use milestone_board::{Error, GitHubClient, IssueSource};
use serde_json::json;

fn slug() -> RepoSlug {
    "acme/api".parse().unwrap()
}

fn github_issue(number: u64) -> serde_json::Value {
    json!({
        "number": number,
        "title": format!("Issue {}", number),
        "state": "open",
        "html_url": format!("https://github.com/acme/api/issues/{}", number),
        "milestone": {"title": "v1", "number": 1},
        "assignee": null,
        "labels": []
    })
}

#[tokio::test]
async fn test_fetch_issues_stamps_repository() {
    let server = MockServer::start_async().await;

    let repo_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api")
                .header("authorization", "Bearer secret");
            then.status(200)
                .json_body(json!({"id": 77, "name": "api", "full_name": "acme/api"}));
        })
        .await;

    let issues_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/issues")
                .query_param("state", "all")
                .query_param("page", "1");
            then.status(200).json_body(json!([
                {
                    "number": 1,
                    "title": "Broken build",
                    "state": "closed",
                    "html_url": "https://github.com/acme/api/issues/1",
                    "milestone": {"title": "v1"},
                    "assignee": {"login": "octo", "id": 5}
                },
                {
                    "number": 2,
                    "title": "Bump deps",
                    "state": "open",
                    "html_url": "https://github.com/acme/api/pull/2",
                    "pull_request": {"url": "https://api.github.com/repos/acme/api/pulls/2"},
                    "milestone": null,
                    "assignee": null
                }
            ]));
        })
        .await;

    let client = GitHubClient::new("secret")
        .unwrap()
        .with_base_url(server.base_url());
    let issues = client.fetch_issues(&slug()).await.unwrap();

    repo_mock.assert_async().await;
    issues_mock.assert_async().await;

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].repo_id, 77);
    assert_eq!(issues[0].repo_name, "api");
    assert_eq!(issues[0].state, IssueState::Closed);
    assert_eq!(issues[0].assignee.as_ref().unwrap().login, "octo");
    assert_eq!(issues[0].estimate, None);
    assert!(issues[1].is_pull_request());
}

#[tokio::test]
async fn test_issues_follow_next_page_links() {
    let server = MockServer::start_async().await;
    let first_page: Vec<_> = (1..=2).map(github_issue).collect();
    let next = format!(
        "<{}/repos/acme/api/issues?state=all&per_page=100&page=2>; rel=\"next\"",
        server.base_url()
    );

    let page_one = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/issues")
                .query_param("page", "1");
            then.status(200)
                .header("link", next.as_str())
                .json_body(json!(first_page));
        })
        .await;

    let page_two = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/issues")
                .query_param("page", "2");
            then.status(200).json_body(json!([github_issue(101)]));
        })
        .await;

    let client = GitHubClient::new("secret")
        .unwrap()
        .with_base_url(server.base_url());
    let issues = client.get_repo_issues(&slug()).await.unwrap();

    page_one.assert_async().await;
    page_two.assert_async().await;
    let numbers: Vec<u64> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![1, 2, 101]);
}

#[tokio::test]
async fn test_missing_repository() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/api");
            then.status(404).json_body(json!({"message": "Not Found"}));
        })
        .await;

    let client = GitHubClient::new("secret")
        .unwrap()
        .with_base_url(server.base_url());
    let result = client.fetch_issues(&slug()).await;

    assert!(matches!(result, Err(Error::RepoNotFound(ref name)) if name == "acme/api"));
}

#[tokio::test]
async fn test_issue_page_error_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/api/issues");
            then.status(500).body("boom");
        })
        .await;

    let client = GitHubClient::new("secret")
        .unwrap()
        .with_base_url(server.base_url());
    let result = client.get_repo_issues(&slug()).await;

    assert!(matches!(result, Err(Error::GitHubApi(ref msg)) if msg.contains("issues of acme/api")));
}
