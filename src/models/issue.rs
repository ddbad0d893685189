use serde::{Deserialize, Deserializer, Serialize};

/// Identity of an issue across every repository on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId {
    pub repo_id: u64,
    pub number: u64,
}

impl IssueId {
    pub fn new(repo_id: u64, number: u64) -> Self {
        Self { repo_id, number }
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.repo_id, self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    pub login: String,
}

/// Marker GitHub attaches to issues that are really pull requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Accepts GitHub's object form as well as a plain boolean flag.
/// Any object or `true` marks a pull request; `null` or `false` does not.
fn deserialize_pull_request<'de, D>(deserializer: D) -> Result<Option<PullRequestRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Marker {
        Flag(bool),
        Object(PullRequestRef),
    }

    Ok(match Option::<Marker>::deserialize(deserializer)? {
        Some(Marker::Flag(true)) => Some(PullRequestRef::default()),
        Some(Marker::Object(pr)) => Some(pr),
        Some(Marker::Flag(false)) | None => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub repo_id: u64,
    pub repo_name: String,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(
        default,
        deserialize_with = "deserialize_pull_request",
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_request: Option<PullRequestRef>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    pub html_url: String,
}

impl Issue {
    pub fn id(&self) -> IssueId {
        IssueId::new(self.repo_id, self.number)
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Exact, case-sensitive comparison against the milestone title.
    pub fn in_milestone(&self, milestone: &str) -> bool {
        self.milestone
            .as_ref()
            .map(|m| m.title == milestone)
            .unwrap_or(false)
    }

    pub fn points(&self) -> f64 {
        self.estimate.unwrap_or(0.0)
    }
}
