use serde::{Deserialize, Serialize};

use super::issue::Issue;

pub const CLOSED_STAGE: &str = "Closed";
pub const DONE_STAGE: &str = "Done";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    /// A pipeline declared by the board, at this position.
    Pipeline(usize),
    /// Catch-all for closed and unplaced issues, always last.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub name: String,
    pub kind: StageKind,
    pub issues: Vec<Issue>,
}

impl Stage {
    pub fn pipeline(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Pipeline(position),
            issues: Vec::new(),
        }
    }

    pub fn closed() -> Self {
        Self {
            name: CLOSED_STAGE.to_string(),
            kind: StageKind::Closed,
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSection {
    pub name: String,
    pub total_points: f64,
    pub issues: Vec<Issue>,
}

impl StageSection {
    /// Sections named exactly "Done" or "Closed" count as completed work.
    pub fn is_completed(&self) -> bool {
        self.name == DONE_STAGE || self.name == CLOSED_STAGE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointTotals {
    pub open: f64,
    pub closed: f64,
}

impl PointTotals {
    pub fn accumulate(&mut self, section: &StageSection) {
        if section.is_completed() {
            self.closed += section.total_points;
        } else {
            self.open += section.total_points;
        }
    }

    pub fn total(&self) -> f64 {
        self.open + self.closed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub milestone: String,
    pub stages: Vec<StageSection>,
    pub totals: PointTotals,
}
