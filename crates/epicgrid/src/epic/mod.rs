pub mod connections;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::layout::NodeId;

/// A resolved epic document, as the data source hands it over: batches of
/// tasks with dependency id lists. Layout and routing treat the document as
/// immutable input; nothing here is written back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: NodeId,
    pub title: String,
    /// Batch-level dependencies declared in the document.
    #[serde(default)]
    pub depends_on: Vec<NodeId>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: NodeId,
    /// GitHub issue number. Display only; layout and routing ignore it.
    #[serde(default)]
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Task ids this task depends on. May reference tasks in other
    /// batches; those edges surface one level up.
    #[serde(default)]
    pub depends_on: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }
}

impl Epic {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed epic document: {}", path.display()))
    }

    pub fn task_count(&self) -> usize {
        self.batches.iter().map(|b| b.tasks.len()).sum()
    }
}
