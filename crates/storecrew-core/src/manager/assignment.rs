//! Task assignment by category

use super::tasks::Task;
use crate::agents::AgentCategory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tasks bucketed by owning agent. Rebuilt from scratch on every parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskAssignmentMap {
    buckets: BTreeMap<AgentCategory, Vec<Task>>,
}

impl TaskAssignmentMap {
    /// Build assignments for a task list
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut map = Self::default();
        map.rebuild(tasks);
        map
    }

    /// Clear and repopulate.
    ///
    /// Each task goes to its own category; each subtask goes to its own
    /// category unless no routing rule matched it, in which case it follows
    /// its parent.
    pub fn rebuild(&mut self, tasks: &[Task]) {
        self.buckets.clear();
        for task in tasks {
            self.assign(task.category, task);
            for sub in &task.subtasks {
                let category = if sub.classified {
                    sub.category
                } else {
                    task.category
                };
                self.assign(category, sub);
            }
        }
    }

    fn assign(&mut self, category: AgentCategory, task: &Task) {
        self.buckets.entry(category).or_default().push(task.clone());
    }

    /// Tasks assigned to a category
    pub fn get(&self, category: AgentCategory) -> &[Task] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty buckets in category order
    pub fn iter(&self) -> impl Iterator<Item = (AgentCategory, &[Task])> {
        self.buckets
            .iter()
            .filter(|(_, tasks)| !tasks.is_empty())
            .map(|(category, tasks)| (*category, tasks.as_slice()))
    }

    /// Number of assigned entries across all buckets
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether nothing is assigned
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
