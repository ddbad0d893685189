use serde::{Deserialize, Serialize};

use super::issue::IssueId;

/// Declares that an issue currently sits in a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMembership {
    pub repo_id: u64,
    pub issue_number: u64,
    /// Estimate recorded on the board, if the board tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
}

impl StageMembership {
    pub fn id(&self) -> IssueId {
        IssueId::new(self.repo_id, self.issue_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub name: String,
    #[serde(default)]
    pub issues: Vec<StageMembership>,
}

/// Board pipelines in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub pipelines: Vec<PipelineDefinition>,
}

impl Board {
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// All memberships in board order, tagged with their pipeline position.
    pub fn memberships(&self) -> impl Iterator<Item = (usize, &StageMembership)> {
        self.pipelines
            .iter()
            .enumerate()
            .flat_map(|(position, pipeline)| pipeline.issues.iter().map(move |m| (position, m)))
    }
}
