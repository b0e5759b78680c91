//! Task dependency graph
//!
//! The enhancer runs the basic extractor and then infers which tasks block
//! which. Edges point from a dependency to the task that waits on it, so a
//! node's outbound count is the number of tasks it blocks.

use super::tasks::{all_tasks, extract_tasks, Task};
use crate::agents::AgentCategory;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Phrases that introduce the title of a blocking task
const DEPENDENCY_PHRASES: &[&str] = &["depends on", "after", "requires", "blocked by"];

/// Graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Task id
    pub id: String,
    /// Task title
    pub title: String,
    /// Owning agent
    pub category: AgentCategory,
}

/// Graph edge: `from` blocks `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Blocking task id
    pub from: String,
    /// Waiting task id
    pub to: String,
}

/// Dependency graph over tasks and subtasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    /// Nodes in document order
    pub nodes: Vec<GraphNode>,
    /// Edges
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// Build a graph from task dependencies
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let nodes: Vec<GraphNode> = all_tasks(tasks)
            .map(|t| GraphNode {
                id: t.id.clone(),
                title: t.title.clone(),
                category: t.category,
            })
            .collect();
        let edges = all_tasks(tasks)
            .flat_map(|t| {
                t.dependencies.iter().map(move |dep| GraphEdge {
                    from: dep.clone(),
                    to: t.id.clone(),
                })
            })
            .filter(|e| nodes.iter().any(|n| n.id == e.from))
            .collect();
        Self { nodes, edges }
    }

    /// Number of tasks a node blocks
    pub fn outbound_count(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.from == id).count()
    }

    /// Up to `size` nodes that block the most tasks.
    ///
    /// Nodes that block nothing are left out; ties keep document order.
    pub fn critical_path(&self, size: usize) -> Vec<(&GraphNode, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            *counts.entry(edge.from.as_str()).or_default() += 1;
        }
        let mut ranked: Vec<(&GraphNode, usize)> = self
            .nodes
            .iter()
            .filter_map(|n| counts.get(n.id.as_str()).map(|c| (n, *c)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(size);
        ranked
    }
}

/// Dependency-aware task extraction
#[async_trait]
pub trait TaskGraphEnhancer: Send + Sync {
    /// Extract tasks with their dependencies filled in
    async fn extract_tasks_with_dependencies(&self, markdown: &str) -> Result<Vec<Task>>;

    /// Build the graph for extracted tasks
    fn generate_dependency_graph(&self, tasks: &[Task]) -> DependencyGraph {
        DependencyGraph::from_tasks(tasks)
    }
}

/// Shared enhancer handle
pub type SharedEnhancer = Arc<dyn TaskGraphEnhancer>;

/// Enhancer that infers dependencies from phrases and team layering
#[derive(Debug, Clone)]
pub struct HeuristicEnhancer {
    max_document_bytes: usize,
}

impl HeuristicEnhancer {
    /// Create an enhancer with the document size limit
    pub fn new(max_document_bytes: usize) -> Self {
        Self { max_document_bytes }
    }
}

#[async_trait]
impl TaskGraphEnhancer for HeuristicEnhancer {
    async fn extract_tasks_with_dependencies(&self, markdown: &str) -> Result<Vec<Task>> {
        let mut tasks = extract_tasks(markdown, self.max_document_bytes)?;
        add_phrase_dependencies(&mut tasks);
        add_layer_dependencies(&mut tasks);
        debug!(
            dependencies = all_tasks(&tasks).map(|t| t.dependencies.len()).sum::<usize>(),
            "Inferred task dependencies"
        );
        Ok(tasks)
    }
}

/// "depends on <title>", "after <title>", ... naming another task
fn add_phrase_dependencies(tasks: &mut [Task]) {
    let titles: Vec<(String, String)> = all_tasks(tasks)
        .map(|t| (t.id.clone(), t.title.to_lowercase()))
        .collect();

    for task in tasks.iter_mut() {
        link_named_tasks(task, &titles);
        for sub in &mut task.subtasks {
            link_named_tasks(sub, &titles);
        }
    }
}

fn link_named_tasks(task: &mut Task, titles: &[(String, String)]) {
    let text = format!("{} {}", task.title, task.description).to_lowercase();
    for (id, title) in titles {
        if *id == task.id {
            continue;
        }
        if DEPENDENCY_PHRASES
            .iter()
            .any(|phrase| text.contains(&format!("{phrase} {title}")))
        {
            task.depends_on(id);
        }
    }
}

/// Database before Backend before Frontend; DevOps after everything else
fn add_layer_dependencies(tasks: &mut [Task]) {
    for i in 0..tasks.len() {
        let (earlier, rest) = tasks.split_at_mut(i);
        let task = &mut rest[0];
        for prior in earlier.iter() {
            let blocks = match task.category {
                AgentCategory::Backend => prior.category == AgentCategory::Database,
                AgentCategory::Frontend => prior.category == AgentCategory::Backend,
                AgentCategory::DevOps => prior.category != AgentCategory::DevOps,
                _ => false,
            };
            if blocks {
                task.depends_on(&prior.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Orders database schema
# Orders API endpoint
# Order history React component
# Docker deployment
# Newsletter
Send after Orders API endpoint is live
";

    async fn extract(md: &str) -> Vec<Task> {
        HeuristicEnhancer::new(1_000_000)
            .extract_tasks_with_dependencies(md)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_layer_dependencies() {
        let tasks = extract(DOC).await;
        let cats: Vec<AgentCategory> = tasks.iter().map(|t| t.category).collect();
        assert_eq!(
            cats,
            vec![
                AgentCategory::Ecommerce,
                AgentCategory::Ecommerce,
                AgentCategory::Ecommerce,
                AgentCategory::DevOps,
                AgentCategory::Ecommerce,
            ]
        );
        assert_eq!(tasks[3].dependencies, vec!["task-1", "task-2", "task-3"]);
        assert_eq!(tasks[4].dependencies, vec!["task-2"]);
    }

    #[tokio::test]
    async fn test_layers_by_category() {
        let md = "# Postgres tables\n# REST API\n# React components\n# Landing copy";
        let tasks = extract(md).await;

        assert_eq!(tasks[1].category, AgentCategory::Backend);
        assert_eq!(tasks[1].dependencies, vec!["task-1"]);
        assert_eq!(tasks[2].category, AgentCategory::Frontend);
        assert_eq!(tasks[2].dependencies, vec!["task-2"]);
        assert!(tasks[3].dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_phrase_dependency_on_subtask() {
        let md = "# Launch\n## Seed data\n## Smoke checks\nrun these once seeding is done, requires seed data";
        let tasks = extract(md).await;

        assert_eq!(tasks[0].subtasks[1].dependencies, vec!["task-1-1"]);
    }

    #[tokio::test]
    async fn test_graph_and_critical_path() {
        let tasks = extract(DOC).await;
        let graph = HeuristicEnhancer::new(1_000_000).generate_dependency_graph(&tasks);

        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges.len(), 4);
        assert_eq!(graph.outbound_count("task-2"), 2);

        let path: Vec<(&str, usize)> = graph
            .critical_path(3)
            .into_iter()
            .map(|(n, c)| (n.id.as_str(), c))
            .collect();
        assert_eq!(path, vec![("task-2", 2), ("task-1", 1), ("task-3", 1)]);
    }

    #[test]
    fn test_critical_path_skips_leaf_nodes() {
        let tasks = extract_tasks("# Gift cards\n# Wishlist", 1_000).unwrap();
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());
        assert!(graph.critical_path(3).is_empty());
    }
}
