//! Project summaries

use super::state::ProjectState;
use crate::agents::profile_of;

/// Options offered at the end of every summary
const NEXT_STEPS: &[&str] = &[
    "Review the task assignments above and tell me what to change",
    "Start with a specific agent, for example \"ask the Backend Developer about the order API\"",
    "Generate a timeline for the project phases",
    "Request an architecture review before implementation starts",
];

/// Summary without dependency information
pub fn basic_summary(state: &ProjectState, preview_limit: usize) -> String {
    let mut out = String::from("# Project Requirements Summary\n\n");
    out.push_str(&format!(
        "**Tasks:** {} top-level, {} subtasks\n",
        state.tasks.len(),
        state.subtask_count()
    ));

    for (category, tasks) in state.assignments.iter() {
        out.push_str(&format!(
            "\n## {} ({})\n",
            profile_of(category).name,
            tasks.len()
        ));
        for task in tasks.iter().take(preview_limit) {
            out.push_str(&format!("- [{}] {}\n", task.priority, task.title));
        }
        if tasks.len() > preview_limit {
            out.push_str(&format!("- ...and {} more\n", tasks.len() - preview_limit));
        }
    }

    out.push_str("\n## Next Steps\n\n");
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        out.push_str(&format!("{}. {step}\n", i + 1));
    }
    out
}

/// Summary with dependency analysis and critical path.
///
/// Falls back to the basic summary when no graph is available.
pub fn enhanced_summary(
    state: &ProjectState,
    preview_limit: usize,
    critical_path_size: usize,
) -> String {
    let Some(graph) = &state.graph else {
        return basic_summary(state, preview_limit);
    };
    let basic = basic_summary(state, preview_limit);
    let (body, footer) = basic
        .split_once("\n## Next Steps")
        .unwrap_or((basic.as_str(), ""));

    let mut out = body.to_string();
    out.push_str(&format!(
        "\n## Dependency Analysis\n\n- Nodes: {}\n- Edges: {}\n",
        graph.nodes.len(),
        graph.edges.len()
    ));

    out.push_str("\n## Critical Path\n\n");
    let path = graph.critical_path(critical_path_size);
    if path.is_empty() {
        out.push_str("No blocking dependencies found.\n");
    }
    for (node, count) in path {
        out.push_str(&format!(
            "- {} ({}): blocks {} task(s)\n",
            node.title,
            profile_of(node.category).name,
            count
        ));
    }

    if !footer.is_empty() {
        out.push_str("\n## Next Steps");
        out.push_str(footer);
    }
    out
}
