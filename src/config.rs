use crate::error::{Error, Result};
use crate::models::RepoSlug;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub zenhub_token: Option<String>,
    pub workspace_id: Option<String>,
    pub board_repo_id: Option<u64>,
    pub repositories: Vec<RepoSlug>,
    pub milestone: Option<String>,
    pub concurrency_limit: usize,
    pub resolve_estimates: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let board_repo_id = match non_empty("ZENHUB_REPO_ID") {
            Some(v) => Some(v.trim().parse().map_err(|_| {
                Error::Config(format!("ZENHUB_REPO_ID must be a number, got '{}'", v))
            })?),
            None => None,
        };

        let repositories = match non_empty("REPOSITORIES") {
            Some(v) => parse_repositories(&v)?,
            None => Vec::new(),
        };

        let concurrency_limit = non_empty("CONCURRENCY_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(5);

        let resolve_estimates = non_empty("RESOLVE_ESTIMATES")
            .map(|v| v.trim().to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            github_token: non_empty("GITHUB_TOKEN"),
            zenhub_token: non_empty("ZENHUB_TOKEN"),
            workspace_id: non_empty("ZENHUB_WORKSPACE_ID"),
            board_repo_id,
            repositories,
            milestone: var("MILESTONE"),
            concurrency_limit,
            resolve_estimates,
        })
    }

    pub fn require_github_token(&self) -> Result<&str> {
        self.github_token
            .as_deref()
            .ok_or_else(|| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))
    }

    pub fn require_zenhub_token(&self) -> Result<&str> {
        self.zenhub_token
            .as_deref()
            .ok_or_else(|| Error::Config("ZENHUB_TOKEN environment variable not set".to_string()))
    }

    pub fn require_workspace(&self) -> Result<(&str, u64)> {
        let workspace_id = self.workspace_id.as_deref().ok_or_else(|| {
            Error::Config("ZENHUB_WORKSPACE_ID environment variable not set".to_string())
        })?;
        let repo_id = self.board_repo_id.ok_or_else(|| {
            Error::Config("ZENHUB_REPO_ID environment variable not set".to_string())
        })?;
        Ok((workspace_id, repo_id))
    }
}

/// Parses a comma-separated list of `owner/name` slugs.
pub fn parse_repositories(value: &str) -> Result<Vec<RepoSlug>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub milestone: String,
    pub concurrency_limit: usize,
    pub resolve_estimates: bool,
}

impl ReportConfig {
    /// A milestone given on the command line wins over `MILESTONE`.
    pub fn resolve(config: &Config, milestone: Option<String>) -> Result<Self> {
        let milestone = milestone
            .or_else(|| config.milestone.clone())
            .ok_or_else(|| {
                Error::Config("No milestone given; pass --milestone or set MILESTONE".to_string())
            })?;

        Ok(Self {
            milestone,
            concurrency_limit: config.concurrency_limit,
            resolve_estimates: config.resolve_estimates,
        })
    }
}
