use serde::Deserialize;

use crate::models::{
    Assignee, Issue, IssueState, Milestone, PullRequestRef, Repository,
};

/// Issue as returned by `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub html_url: String,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
}

impl GitHubIssue {
    pub fn into_issue(self, repo: &Repository) -> Issue {
        Issue {
            repo_id: repo.id,
            repo_name: repo.name.clone(),
            number: self.number,
            title: self.title,
            state: self.state,
            pull_request: self.pull_request,
            milestone: self.milestone,
            estimate: None,
            assignee: self.assignee,
            html_url: self.html_url,
        }
    }
}
