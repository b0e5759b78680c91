//! Dependency detection
//!
//! Finds cross-team needs in an agent's draft. Explicit
//! `COORDINATE_WITH:<CATEGORY>:<detail>` markers win outright; only when none
//! are present do the implicit phrase heuristics run.

use crate::agents::AgentCategory;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

/// Explicit coordination marker (detail runs until the next marker)
static COORDINATE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"COORDINATE_WITH:([A-Za-z_-]+):")
        .expect("COORDINATE_TAG is a compile-time constant")
});

/// Implicit heuristics, checked in order against draft and user message
static IMPLICIT_PATTERNS: LazyLock<Vec<(Regex, AgentCategory)>> = LazyLock::new(|| {
    [
        (r"(?i)\bneed.*\b(api|endpoint|backend|server)", AgentCategory::Backend),
        (r"(?i)\bbackend\b.*\bfirst\b", AgentCategory::Backend),
        (r"(?i)\bdatabase\b.*\b(schema|model|design)", AgentCategory::Database),
        (r"(?i)\b(ui|design\w*)\b.*\bneeded\b", AgentCategory::Ux),
        (r"(?i)\b(deployment|pipeline)\b.*\bset ?up\b", AgentCategory::DevOps),
        (r"(?i)\bfrontend\b.*\bintegration\b", AgentCategory::Frontend),
    ]
    .into_iter()
    .map(|(pattern, category)| {
        (
            Regex::new(pattern).expect("implicit pattern is a compile-time constant"),
            category,
        )
    })
    .collect()
});

/// Cross-team needs found in one draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyInfo {
    /// Whether any dependency was found
    pub has_dependencies: bool,
    /// Categories to consult, in detection order, without duplicates
    pub dependent_agents: Vec<AgentCategory>,
    /// Accumulated detail text
    pub dependency_details: String,
}

impl DependencyInfo {
    fn add_agent(&mut self, category: AgentCategory) -> bool {
        if self.dependent_agents.contains(&category) {
            return false;
        }
        self.dependent_agents.push(category);
        true
    }
}

/// Detect dependencies in a draft and the message it answers
#[must_use]
pub fn detect_dependencies(response: &str, user_message: &str) -> DependencyInfo {
    detect_dependencies_for(None, response, user_message)
}

/// Detect dependencies on behalf of a speaking agent.
///
/// The speaker's own category is never recorded as a dependency.
#[must_use]
pub fn detect_dependencies_for(
    speaker: Option<AgentCategory>,
    response: &str,
    user_message: &str,
) -> DependencyInfo {
    let mut info = DependencyInfo::default();

    let tags: Vec<_> = COORDINATE_TAG.captures_iter(response).collect();
    if !tags.is_empty() {
        info.has_dependencies = true;
        for (i, caps) in tags.iter().enumerate() {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = tags
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(response.len(), |m| m.start());
            let detail = response[whole.end()..end].trim();

            match AgentCategory::from_tag(name.as_str()) {
                Some(category) if Some(category) != speaker => {
                    info.add_agent(category);
                }
                Some(_) => debug!(tag = name.as_str(), "Ignoring self-coordination tag"),
                None => debug!(tag = name.as_str(), "Unknown coordination tag"),
            }
            info.dependency_details.push_str(detail);
            info.dependency_details.push(' ');
        }
        debug!(agents = ?info.dependent_agents, "Explicit coordination tags found");
        return info;
    }

    for (pattern, category) in IMPLICIT_PATTERNS.iter() {
        if Some(*category) == speaker {
            continue;
        }
        if pattern.is_match(response) || pattern.is_match(user_message) {
            if info.add_agent(*category) {
                info.dependency_details.push_str(&format!(
                    "Need input from {} specialist. ",
                    category.as_str()
                ));
            }
        }
    }
    info.has_dependencies = !info.dependent_agents.is_empty();
    if info.has_dependencies {
        debug!(agents = ?info.dependent_agents, "Implicit dependencies found");
    }
    info
}
