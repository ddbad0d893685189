use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Board, Issue, IssueId, RepoSlug};

#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Every issue of the repository, open and closed, pull requests included.
    async fn fetch_issues(&self, repo: &RepoSlug) -> Result<Vec<Issue>>;
    fn name(&self) -> &str;
}

#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn fetch_board(&self) -> Result<Board>;
    async fn fetch_estimate(&self, id: IssueId) -> Result<Option<f64>>;
    fn name(&self) -> &str;
}
