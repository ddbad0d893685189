use crate::analysis::board_index::BoardIndex;
use crate::models::{Board, Issue, Stage};

/// Distributes issues over the board pipelines plus the trailing Closed stage.
///
/// Pull requests are dropped. An open issue found in the index goes to its
/// pipeline; everything else (closed, or never placed) goes to Closed.
pub fn classify(issues: Vec<Issue>, board: &Board, index: &BoardIndex) -> Vec<Stage> {
    let mut stages: Vec<Stage> = board
        .pipelines
        .iter()
        .enumerate()
        .map(|(position, pipeline)| Stage::pipeline(pipeline.name.clone(), position))
        .collect();
    let closed_position = stages.len();
    stages.push(Stage::closed());

    let mut dropped = 0usize;
    for issue in issues {
        if issue.is_pull_request() {
            dropped += 1;
            continue;
        }

        let target = match index.position(&issue.id()) {
            Some(position) if !issue.is_closed() && position < closed_position => position,
            _ => closed_position,
        };
        stages[target].issues.push(issue);
    }

    if dropped > 0 {
        tracing::debug!("Skipped {} pull requests", dropped);
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        IssueState, PipelineDefinition, PullRequestRef, StageKind, StageMembership, CLOSED_STAGE,
    };

    fn issue(repo_id: u64, number: u64, state: IssueState) -> Issue {
        Issue {
            repo_id,
            repo_name: format!("repo{}", repo_id),
            number,
            title: format!("Issue {}", number),
            state,
            pull_request: None,
            milestone: None,
            estimate: None,
            assignee: None,
            html_url: format!("https://github.com/acme/repo{}/issues/{}", repo_id, number),
        }
    }

    fn membership(repo_id: u64, issue_number: u64) -> StageMembership {
        StageMembership {
            repo_id,
            issue_number,
            estimate: None,
        }
    }

    fn board() -> Board {
        Board {
            pipelines: vec![
                PipelineDefinition {
                    name: "Backlog".to_string(),
                    issues: vec![membership(1, 1)],
                },
                PipelineDefinition {
                    name: "In Progress".to_string(),
                    issues: vec![membership(1, 2), membership(2, 1)],
                },
            ],
        }
    }

    fn numbers(stage: &Stage) -> Vec<(u64, u64)> {
        stage.issues.iter().map(|i| (i.repo_id, i.number)).collect()
    }

    #[test]
    fn test_closed_stage_is_always_appended() {
        let board = board();
        let index = BoardIndex::build(&board);
        let stages = classify(Vec::new(), &board, &index);

        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0].kind, StageKind::Pipeline(0));
        assert_eq!(stages[1].kind, StageKind::Pipeline(1));
        assert_eq!(stages[2].kind, StageKind::Closed);
        assert_eq!(stages[2].name, CLOSED_STAGE);
    }

    #[test]
    fn test_open_issues_follow_the_board() {
        let board = board();
        let index = BoardIndex::build(&board);
        let issues = vec![
            issue(2, 1, IssueState::Open),
            issue(1, 1, IssueState::Open),
            issue(1, 2, IssueState::Open),
        ];

        let stages = classify(issues, &board, &index);
        assert_eq!(numbers(&stages[0]), vec![(1, 1)]);
        assert_eq!(numbers(&stages[1]), vec![(2, 1), (1, 2)]);
        assert!(stages[2].issues.is_empty());
    }

    #[test]
    fn test_closed_and_unplaced_issues_go_to_closed() {
        let board = board();
        let index = BoardIndex::build(&board);
        let issues = vec![
            issue(1, 1, IssueState::Closed),
            issue(3, 9, IssueState::Open),
            issue(3, 10, IssueState::Closed),
        ];

        let stages = classify(issues, &board, &index);
        assert!(stages[0].issues.is_empty());
        assert_eq!(numbers(&stages[2]), vec![(1, 1), (3, 9), (3, 10)]);
    }

    #[test]
    fn test_pull_requests_are_dropped() {
        let board = board();
        let index = BoardIndex::build(&board);
        let mut pr = issue(1, 2, IssueState::Open);
        pr.pull_request = Some(PullRequestRef::default());
        let mut closed_pr = issue(1, 99, IssueState::Closed);
        closed_pr.pull_request = Some(PullRequestRef::default());

        let stages = classify(vec![pr, closed_pr], &board, &index);
        assert!(stages.iter().all(|s| s.issues.is_empty()));
    }

    #[test]
    fn test_every_issue_lands_in_exactly_one_stage() {
        let board = board();
        let index = BoardIndex::build(&board);
        let issues: Vec<Issue> = (1..=4)
            .flat_map(|repo| {
                (1..=3).map(move |n| {
                    let state = if (repo + n) % 3 == 0 {
                        IssueState::Closed
                    } else {
                        IssueState::Open
                    };
                    issue(repo, n, state)
                })
            })
            .collect();
        let expected = issues.len();

        let stages = classify(issues, &board, &index);
        let mut placed: Vec<(u64, u64)> = stages.iter().flat_map(numbers).collect();
        assert_eq!(placed.len(), expected);
        placed.sort();
        placed.dedup();
        assert_eq!(placed.len(), expected);
    }
}
