//! Manager - project state and the Development Manager agent
//!
//! - Tasks: heading-based requirements parsing
//! - Assignment: tasks bucketed by agent
//! - Graph: dependency inference and critical path
//! - Summary: markdown reports
//! - Intent: what the user wants from the Manager

mod agent;
mod assignment;
mod graph;
mod intent;
mod state;
mod summary;
mod tasks;

#[cfg(test)]
mod tests;

pub use agent::{security_review, ManagerAgent, NO_PROJECT_MESSAGE};
pub use assignment::TaskAssignmentMap;
pub use graph::{
    DependencyGraph, GraphEdge, GraphNode, HeuristicEnhancer, SharedEnhancer, TaskGraphEnhancer,
};
pub use intent::{looks_like_document, ManagerIntent};
pub use state::{new_project_store, ProjectState, ProjectStore};
pub use summary::{basic_summary, enhanced_summary};
pub use tasks::{all_tasks, extract_tasks, Priority, Task};
