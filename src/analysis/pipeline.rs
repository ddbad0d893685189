use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::build_report;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::models::{Board, Issue, IssueId, RepoSlug, Report};
use crate::source::{BoardSource, IssueSource, Snapshot};

pub struct ReportPipeline {
    issues: Arc<dyn IssueSource>,
    board: Arc<dyn BoardSource>,
    config: ReportConfig,
}

impl ReportPipeline {
    pub fn new(
        issues: impl IssueSource + 'static,
        board: impl BoardSource + 'static,
        config: ReportConfig,
    ) -> Self {
        Self {
            issues: Arc::new(issues),
            board: Arc::new(board),
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub async fn run(&self, repos: &[RepoSlug]) -> Result<Report> {
        let snapshot = self.collect(repos).await?;
        Ok(build_report(
            &snapshot.board,
            snapshot.issues,
            &self.config.milestone,
        ))
    }

    /// Fetches the board and every repository's issues. Nothing is returned
    /// until all repositories have answered.
    pub async fn collect(&self, repos: &[RepoSlug]) -> Result<Snapshot> {
        // Step 1: Board layout
        tracing::info!("Fetching board from {}", self.board.name());
        let board = self.board.fetch_board().await?;
        tracing::info!(
            "Board has {} pipelines and {} placed issues",
            board.pipeline_count(),
            board.memberships().count()
        );

        // Step 2: Issues from every repository
        let mut issues = self.fetch_all_issues(repos).await?;
        tracing::info!(
            "Fetched {} issues from {} repositories",
            issues.len(),
            repos.len()
        );

        // Step 3: Estimates
        let filled = attach_board_estimates(&board, &mut issues);
        tracing::debug!("Filled {} estimates from the board", filled);

        if self.config.resolve_estimates {
            self.resolve_missing_estimates(&mut issues).await?;
        }

        Ok(Snapshot { board, issues })
    }

    async fn fetch_all_issues(&self, repos: &[RepoSlug]) -> Result<Vec<Issue>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = progress_bar(repos.len() as u64, "repos");

        let mut issue_futures = Vec::new();

        for repo in repos {
            let source = self.issues.clone();
            let sem = semaphore.clone();
            let repo = repo.clone();
            let pb_clone = pb.clone();

            issue_futures.push(async move {
                let _permit = sem.acquire().await.ok();
                let result = source.fetch_issues(&repo).await;
                if let Err(ref e) = result {
                    tracing::error!("Failed to fetch issues for {}: {}", repo, e);
                }
                pb_clone.inc(1);
                result
            });
        }

        let results = join_all(issue_futures).await;
        pb.finish_with_message("Fetched all issues");

        let per_repo = results.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(per_repo.into_iter().flatten().collect())
    }

    /// Looks up estimates the board did not carry, for issues that will be
    /// counted in the milestone totals.
    async fn resolve_missing_estimates(&self, issues: &mut [Issue]) -> Result<()> {
        let missing: Vec<IssueId> = issues
            .iter()
            .filter(|i| {
                !i.is_pull_request()
                    && i.estimate.is_none()
                    && i.in_milestone(&self.config.milestone)
            })
            .map(Issue::id)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        tracing::info!("Resolving {} missing estimates", missing.len());
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = progress_bar(missing.len() as u64, "estimates");

        let lookups = missing.into_iter().map(|id| {
            let source = self.board.clone();
            let sem = semaphore.clone();
            let pb_clone = pb.clone();
            async move {
                let _permit = sem.acquire().await.ok();
                let estimate = source.fetch_estimate(id).await;
                pb_clone.inc(1);
                estimate.map(|e| (id, e))
            }
        });

        let results = join_all(lookups).await;
        pb.finish_with_message("Resolved estimates");

        let resolved: HashMap<IssueId, f64> = results
            .into_iter()
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter_map(|(id, estimate)| estimate.map(|e| (id, e)))
            .collect();

        for issue in issues.iter_mut() {
            if issue.estimate.is_none() {
                issue.estimate = resolved.get(&issue.id()).copied();
            }
        }

        Ok(())
    }
}

/// Copies board estimates onto issues that have none, returning how many
/// were filled. The last membership listing an estimate wins.
pub fn attach_board_estimates(board: &Board, issues: &mut [Issue]) -> usize {
    let estimates: HashMap<IssueId, f64> = board
        .memberships()
        .filter_map(|(_, m)| m.estimate.map(|e| (m.id(), e)))
        .collect();

    let mut filled = 0;
    for issue in issues.iter_mut().filter(|i| i.estimate.is_none()) {
        if let Some(&estimate) = estimates.get(&issue.id()) {
            issue.estimate = Some(estimate);
            filled += 1;
        }
    }
    filled
}

fn progress_bar(len: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = format!(
        "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {}",
        unit
    );
    match ProgressStyle::default_bar().template(&template) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
    }
    pb
}
