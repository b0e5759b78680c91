//! Requirements document parsing
//!
//! `# ` headings start tasks, `## ` headings start subtasks of the latest
//! task, everything else is description. The parser never rejects a
//! document for its shape; only oversized input is an error.

use crate::agents::AgentCategory;
use crate::error::{Error, Result};
use crate::routing::match_task;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*+]|\d+[.)])\s+(.+)$").expect("LIST_ITEM is a compile-time constant")
});

static HIGH_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(critical|urgent|must|high priority|asap)\b")
        .expect("HIGH_PRIORITY is a compile-time constant")
});

static LOW_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(nice to have|optional|later|low priority|could)\b")
        .expect("LOW_PRIORITY is a compile-time constant")
});

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Default
    #[default]
    Medium,
    /// Blocks launch
    High,
}

impl Priority {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Infer priority from keywords; high wins over low
    pub fn infer(text: &str) -> Self {
        if HIGH_PRIORITY.is_match(text) {
            Self::High
        } else if LOW_PRIORITY.is_match(text) {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit of work extracted from a requirements document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `task-<n>` or `task-<n>-<m>`
    pub id: String,
    /// Heading text
    pub title: String,
    /// Accumulated description lines
    pub description: String,
    /// Owning agent
    pub category: AgentCategory,
    /// Whether a routing rule matched, as opposed to the Manager fallback
    #[serde(default)]
    pub classified: bool,
    /// Priority
    pub priority: Priority,
    /// Subtasks (only one level deep)
    #[serde(default)]
    pub subtasks: Vec<Task>,
    /// Ids of tasks this one waits on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    fn new(id: String, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: String::new(),
            category: AgentCategory::Manager,
            classified: false,
            priority: Priority::Medium,
            subtasks: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(line);
    }

    fn classify(&mut self) {
        let text = format!("{} {}", self.title, self.description);
        self.priority = Priority::infer(&text);
        let matched = match_task(&text);
        self.classified = matched.is_some();
        self.category = matched.unwrap_or(AgentCategory::Manager);
        for sub in &mut self.subtasks {
            sub.classify();
        }
    }

    /// Add a dependency unless it is already present or is this task
    pub fn depends_on(&mut self, id: &str) {
        if id != self.id && !self.dependencies.iter().any(|d| d == id) {
            self.dependencies.push(id.to_string());
        }
    }

    /// This task followed by its subtasks
    pub fn flatten(&self) -> impl Iterator<Item = &Task> {
        std::iter::once(self).chain(self.subtasks.iter())
    }
}

/// Iterate every task and subtask in document order
pub fn all_tasks(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().flat_map(Task::flatten)
}

fn description_line(line: &str) -> String {
    if let Some(caps) = LIST_ITEM.captures(line) {
        if let Some(text) = caps.get(1) {
            return format!("• {}", text.as_str().trim());
        }
    }
    line.trim_start_matches('#').trim().to_string()
}

/// Parse a requirements document into tasks
pub fn extract_tasks(markdown: &str, max_bytes: usize) -> Result<Vec<Task>> {
    if markdown.len() > max_bytes {
        return Err(Error::Parse(format!(
            "document is {} bytes, limit is {max_bytes}",
            markdown.len()
        )));
    }

    let mut tasks: Vec<Task> = Vec::new();
    for raw in markdown.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(title) = line.strip_prefix("# ") {
            let title = title.trim();
            if !title.is_empty() {
                tasks.push(Task::new(format!("task-{}", tasks.len() + 1), title));
            }
        } else if let Some(title) = line.strip_prefix("## ") {
            let title = title.trim();
            let Some(parent) = tasks.last_mut() else {
                debug!(title, "Subtask heading before any task, ignored");
                continue;
            };
            if !title.is_empty() {
                let id = format!("{}-{}", parent.id, parent.subtasks.len() + 1);
                parent.subtasks.push(Task::new(id, title));
            }
        } else if let Some(task) = tasks.last_mut() {
            let text = description_line(line);
            match task.subtasks.last_mut() {
                Some(sub) => sub.push_line(&text),
                None => task.push_line(&text),
            }
        }
    }

    for task in &mut tasks {
        task.classify();
    }
    debug!(tasks = tasks.len(), "Extracted tasks");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1_000_000;

    #[test]
    fn test_epics_and_subtasks() {
        let tasks = extract_tasks("# Epic A\n## Sub 1\n- detail one\n# Epic B\n", LIMIT).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Epic A");
        assert_eq!(tasks[0].subtasks.len(), 1);
        assert_eq!(tasks[0].subtasks[0].title, "Sub 1");
        assert!(tasks[0].subtasks[0].description.contains("• detail one"));
        assert_eq!(tasks[1].title, "Epic B");
        assert!(tasks[1].subtasks.is_empty());
    }

    #[test]
    fn test_ids_are_positional() {
        let tasks = extract_tasks("# A\n## A1\n## A2\n# B\n## B1", LIMIT).unwrap();

        let ids: Vec<&str> = all_tasks(&tasks).map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-1-1", "task-1-2", "task-2", "task-2-1"]);
    }

    #[test]
    fn test_tolerant_parsing() {
        assert!(extract_tasks("just some notes\nno headings here", LIMIT)
            .unwrap()
            .is_empty());

        let tasks = extract_tasks("intro\n## Orphan\n- lost\n# Real\ntext", LIMIT).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Real");
        assert_eq!(tasks[0].description, "text");
    }

    #[test]
    fn test_list_items_and_deep_headings() {
        let md = "# Checkout\n* card payments\n+ wallets\n1. guest checkout\n2) saved cards\n### Notes\nplain line";
        let tasks = extract_tasks(md, LIMIT).unwrap();

        assert_eq!(
            tasks[0].description,
            "• card payments\n• wallets\n• guest checkout\n• saved cards\nNotes\nplain line"
        );
    }

    #[test]
    fn test_category_and_priority() {
        let md = "# Product catalog\nMust have variants\n# Marketing blog\nnice to have\n# Kickoff\n## Database schema\n## Meeting notes";
        let tasks = extract_tasks(md, LIMIT).unwrap();

        assert_eq!(tasks[0].category, AgentCategory::Ecommerce);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].priority, Priority::Low);
        assert_eq!(tasks[2].category, AgentCategory::Manager);
        assert_eq!(tasks[2].priority, Priority::Medium);
        assert_eq!(tasks[2].subtasks[0].category, AgentCategory::Database);
    }

    #[test]
    fn test_oversized_document() {
        let err = extract_tasks("# Too big", 3).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
