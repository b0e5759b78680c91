//! Shared project state

use super::assignment::TaskAssignmentMap;
use super::graph::DependencyGraph;
use super::tasks::{all_tasks, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The last processed requirements document and everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct ProjectState {
    /// Raw document
    pub requirements: String,
    /// Extracted tasks
    pub tasks: Vec<Task>,
    /// Assignments by category
    pub assignments: TaskAssignmentMap,
    /// Dependency graph, when the enhancer produced one
    pub graph: Option<DependencyGraph>,
    /// When the document was processed
    pub parsed_at: DateTime<Utc>,
}

impl ProjectState {
    /// Derive state from extracted tasks
    pub fn new(requirements: &str, tasks: Vec<Task>, graph: Option<DependencyGraph>) -> Self {
        let assignments = TaskAssignmentMap::from_tasks(&tasks);
        Self {
            requirements: requirements.to_string(),
            tasks,
            assignments,
            graph,
            parsed_at: Utc::now(),
        }
    }

    /// State for a document that could not be parsed
    pub fn empty(requirements: &str) -> Self {
        Self::new(requirements, Vec::new(), None)
    }

    /// Number of subtasks across all tasks
    pub fn subtask_count(&self) -> usize {
        all_tasks(&self.tasks).count() - self.tasks.len()
    }
}

/// Project state shared by every Manager built from one factory.
///
/// Replaced wholesale on each document; the last write wins.
pub type ProjectStore = Arc<RwLock<Option<ProjectState>>>;

/// Create an empty store
pub fn new_project_store() -> ProjectStore {
    Arc::new(RwLock::new(None))
}
