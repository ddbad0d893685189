use async_trait::async_trait;
use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::github::issue::GitHubIssue;
use crate::github::paginator::Paginator;
use crate::models::{Issue, RepoSlug, Repository};
use crate::source::IssueSource;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("milestone-board/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at another API root, such as GitHub Enterprise.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn get_repository(&self, repo: &RepoSlug) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.name);
        tracing::debug!("Fetching repository: {}", repo);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(repo.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch repository {}: {} - {}",
                repo, status, body
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn get_repo_issues(&self, repo: &RepoSlug) -> Result<Vec<GitHubIssue>> {
        let url = format!(
            "{}/repos/{}/{}/issues?state=all",
            self.base_url, repo.owner, repo.name
        );
        let paginator = Paginator::new(&self.client);
        tracing::info!("Fetching issues for: {}", repo);
        paginator
            .fetch_all(&url, &format!("issues of {}", repo))
            .await
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn fetch_issues(&self, repo: &RepoSlug) -> Result<Vec<Issue>> {
        let repository = self.get_repository(repo).await?;
        let issues = self.get_repo_issues(repo).await?;
        tracing::debug!("{} returned {} issues", repository.full_name, issues.len());

        Ok(issues
            .into_iter()
            .map(|issue| issue.into_issue(&repository))
            .collect())
    }

    fn name(&self) -> &str {
        "GitHub"
    }
}
