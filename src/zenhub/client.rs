use async_trait::async_trait;
use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::models::{Board, IssueId};
use crate::source::BoardSource;
use crate::zenhub::board::{ZenHubBoard, ZenHubIssueData};

const DEFAULT_BASE_URL: &str = "https://api.zenhub.com";

pub struct ZenHubClient {
    client: Client,
    base_url: String,
    workspace_id: String,
    repo_id: u64,
}

impl ZenHubClient {
    /// `repo_id` is the GitHub id of any repository connected to the
    /// workspace; ZenHub addresses workspace boards through one.
    pub fn new(token: &str, workspace_id: impl Into<String>, repo_id: u64) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-Authentication-Token",
            header::HeaderValue::from_str(token)?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            workspace_id: workspace_id.into(),
            repo_id,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn get_board(&self) -> Result<Board> {
        let url = format!(
            "{}/p2/workspaces/{}/repositories/{}/board",
            self.base_url, self.workspace_id, self.repo_id
        );
        tracing::info!("Fetching board for workspace: {}", self.workspace_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ZenHubApi(format!(
                "Failed to fetch board for workspace {}: {} - {}",
                self.workspace_id, status, body
            )));
        }

        let board: ZenHubBoard = response.json().await?;
        Ok(board.into_board(self.repo_id))
    }

    pub async fn get_issue_estimate(&self, id: IssueId) -> Result<Option<f64>> {
        let url = format!(
            "{}/p1/repositories/{}/issues/{}",
            self.base_url, id.repo_id, id.number
        );
        tracing::debug!("Fetching estimate for: {}", id);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ZenHubApi(format!(
                "Failed to fetch issue {}: {} - {}",
                id, status, body
            )));
        }

        let data: ZenHubIssueData = response.json().await?;
        Ok(data.estimate.map(|e| e.value))
    }
}

#[async_trait]
impl BoardSource for ZenHubClient {
    async fn fetch_board(&self) -> Result<Board> {
        self.get_board().await
    }

    async fn fetch_estimate(&self, id: IssueId) -> Result<Option<f64>> {
        self.get_issue_estimate(id).await
    }

    fn name(&self) -> &str {
        "ZenHub"
    }
}
