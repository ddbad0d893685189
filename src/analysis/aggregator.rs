use crate::models::{PointTotals, Report, Stage, StageSection};

/// Restricts stages to one milestone and rolls their estimates up.
pub struct MilestoneAggregator {
    milestone: String,
}

impl MilestoneAggregator {
    pub fn new(milestone: impl Into<String>) -> Self {
        Self {
            milestone: milestone.into(),
        }
    }

    pub fn milestone(&self) -> &str {
        &self.milestone
    }

    pub fn aggregate(&self, stage: &Stage) -> StageSection {
        let issues: Vec<_> = stage
            .issues
            .iter()
            .filter(|issue| issue.in_milestone(&self.milestone))
            .cloned()
            .collect();
        let total_points = issues.iter().fold(0.0, |acc, issue| acc + issue.points());

        StageSection {
            name: stage.name.clone(),
            total_points,
            issues,
        }
    }

    pub fn aggregate_all(&self, stages: &[Stage]) -> Report {
        let mut totals = PointTotals::default();
        let sections: Vec<StageSection> = stages
            .iter()
            .map(|stage| {
                let section = self.aggregate(stage);
                totals.accumulate(&section);
                tracing::debug!(
                    "{}: {} of {} issues in milestone, {} points",
                    section.name,
                    section.issues.len(),
                    stage.issues.len(),
                    section.total_points
                );
                section
            })
            .collect();

        Report {
            milestone: self.milestone.clone(),
            stages: sections,
            totals,
        }
    }
}
