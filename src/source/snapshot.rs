use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Board, Issue};

const BOARD_FILE: &str = "board.json";
const ISSUES_FILE: &str = "issues.json";

/// Everything a report is computed from, as fetched in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub issues: Vec<Issue>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let board = read_json(&dir.join(BOARD_FILE))?;
        let issues = read_json(&dir.join(ISSUES_FILE))?;
        Ok(Self { board, issues })
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        fs::write(dir.join(BOARD_FILE), serde_json::to_string_pretty(&self.board)?)?;
        fs::write(dir.join(ISSUES_FILE), serde_json::to_string_pretty(&self.issues)?)?;
        tracing::info!("Snapshot written to: {}", dir.display());
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::ParseError(format!("{}: {}", path.display(), e)))
}
