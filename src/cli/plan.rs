//! `plan` command

use super::offline_factory;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use storecrew_core::{ProjectState, Task, TaskAssignmentMap};

#[derive(Serialize)]
struct PlanOutput<'a> {
    tasks: &'a [Task],
    assignments: &'a TaskAssignmentMap,
    graph: Option<&'a storecrew_core::manager::DependencyGraph>,
}

impl<'a> From<&'a ProjectState> for PlanOutput<'a> {
    fn from(state: &'a ProjectState) -> Self {
        Self {
            tasks: &state.tasks,
            assignments: &state.assignments,
            graph: state.graph.as_ref(),
        }
    }
}

/// Process a requirements document and print the summary or JSON
pub async fn run(config: &AppConfig, file: &Path, json: bool) -> Result<()> {
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let manager = offline_factory(config).manager();
    let summary = manager.process_markdown(&markdown).await;

    if !json {
        println!("{summary}");
        return Ok(());
    }

    let state = manager
        .project()
        .await
        .context("No project state after processing")?;
    let output = serde_json::to_string_pretty(&PlanOutput::from(&state))
        .context("Failed to serialize plan")?;
    println!("{output}");
    Ok(())
}
