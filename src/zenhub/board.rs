use serde::Deserialize;

use crate::models::{Board, PipelineDefinition, StageMembership};

/// Board as returned by the ZenHub workspace board endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZenHubBoard {
    pub pipelines: Vec<ZenHubPipeline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZenHubPipeline {
    pub name: String,
    #[serde(default)]
    pub issues: Vec<ZenHubBoardIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZenHubBoardIssue {
    pub issue_number: u64,
    /// Absent on single-repository boards.
    #[serde(default)]
    pub repo_id: Option<u64>,
    #[serde(default)]
    pub estimate: Option<ZenHubEstimate>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ZenHubEstimate {
    pub value: f64,
}

/// Per-issue data from `GET /p1/repositories/{repo_id}/issues/{number}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZenHubIssueData {
    #[serde(default)]
    pub estimate: Option<ZenHubEstimate>,
}

impl ZenHubBoard {
    pub fn into_board(self, default_repo_id: u64) -> Board {
        Board {
            pipelines: self
                .pipelines
                .into_iter()
                .map(|pipeline| PipelineDefinition {
                    name: pipeline.name,
                    issues: pipeline
                        .issues
                        .into_iter()
                        .map(|issue| StageMembership {
                            repo_id: issue.repo_id.unwrap_or(default_repo_id),
                            issue_number: issue.issue_number,
                            estimate: issue.estimate.map(|e| e.value),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
