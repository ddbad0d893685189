pub mod board_index;
pub mod classifier;
pub mod aggregator;
pub mod pipeline;

pub use board_index::BoardIndex;
pub use classifier::classify;
pub use aggregator::MilestoneAggregator;
pub use pipeline::ReportPipeline;

use crate::models::{Board, Issue, Report};

/// Runs index, classification and aggregation over one fully fetched snapshot.
pub fn build_report(board: &Board, issues: Vec<Issue>, milestone: &str) -> Report {
    let index = BoardIndex::build(board);
    for id in index.conflicts() {
        tracing::warn!(
            "Issue {} is listed in more than one pipeline, keeping the last one",
            id
        );
    }

    let stages = classify(issues, board, &index);
    MilestoneAggregator::new(milestone).aggregate_all(&stages)
}
