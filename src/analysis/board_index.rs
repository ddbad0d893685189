use std::collections::HashMap;

use crate::models::{Board, IssueId};

/// Lookup from issue identity to the position of the pipeline holding it.
///
/// When the board lists an issue in more than one pipeline the later
/// pipeline wins. Such identities are kept in `conflicts` so callers can
/// report the board data as suspect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardIndex {
    positions: HashMap<IssueId, usize>,
    conflicts: Vec<IssueId>,
    pipeline_count: usize,
}

impl BoardIndex {
    pub fn build(board: &Board) -> Self {
        let mut positions = HashMap::new();
        let mut conflicts = Vec::new();

        for (position, membership) in board.memberships() {
            let id = membership.id();
            if let Some(previous) = positions.insert(id, position) {
                if previous != position && !conflicts.contains(&id) {
                    conflicts.push(id);
                }
            }
        }

        Self {
            positions,
            conflicts,
            pipeline_count: board.pipeline_count(),
        }
    }

    pub fn position(&self, id: &IssueId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of board pipelines, which is also the Closed stage position.
    pub fn pipeline_count(&self) -> usize {
        self.pipeline_count
    }

    pub fn conflicts(&self) -> &[IssueId] {
        &self.conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PipelineDefinition, StageMembership};

    fn pipeline(name: &str, issues: &[(u64, u64)]) -> PipelineDefinition {
        PipelineDefinition {
            name: name.to_string(),
            issues: issues
                .iter()
                .map(|&(repo_id, issue_number)| StageMembership {
                    repo_id,
                    issue_number,
                    estimate: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_index_positions_follow_board_order() {
        let board = Board {
            pipelines: vec![
                pipeline("Backlog", &[(1, 1), (2, 1)]),
                pipeline("In Progress", &[(1, 2)]),
                pipeline("Review", &[]),
            ],
        };

        let index = BoardIndex::build(&board);
        assert_eq!(index.len(), 3);
        assert_eq!(index.pipeline_count(), 3);
        assert_eq!(index.position(&IssueId::new(1, 1)), Some(0));
        assert_eq!(index.position(&IssueId::new(2, 1)), Some(0));
        assert_eq!(index.position(&IssueId::new(1, 2)), Some(1));
        assert_eq!(index.position(&IssueId::new(1, 3)), None);
        assert!(index.conflicts().is_empty());
    }

    #[test]
    fn test_duplicate_membership_last_wins() {
        let board = Board {
            pipelines: vec![
                pipeline("Backlog", &[(1, 5)]),
                pipeline("In Progress", &[]),
                pipeline("Review", &[(1, 5)]),
            ],
        };

        let index = BoardIndex::build(&board);
        assert_eq!(index.len(), 1);
        assert_eq!(index.position(&IssueId::new(1, 5)), Some(2));
        assert_eq!(index.conflicts(), &[IssueId::new(1, 5)]);
    }

    #[test]
    fn test_repeat_within_one_pipeline_is_not_a_conflict() {
        let board = Board {
            pipelines: vec![pipeline("Backlog", &[(1, 5), (1, 5)])],
        };

        let index = BoardIndex::build(&board);
        assert_eq!(index.position(&IssueId::new(1, 5)), Some(0));
        assert!(index.conflicts().is_empty());
    }

    #[test]
    fn test_empty_board() {
        let index = BoardIndex::build(&Board::default());
        assert!(index.is_empty());
        assert_eq!(index.pipeline_count(), 0);
    }
}
