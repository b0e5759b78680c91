//! Conversation context and prompt rendering

use super::profile::AgentProfile;
use serde::{Deserialize, Serialize};
use storecrew_llm::ROLE_LINE_PREFIX;

/// A project phase supplied as context for generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase name
    pub name: String,
    /// What the phase covers
    #[serde(default)]
    pub description: String,
    /// Task titles in the phase
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Phase {
    /// Create a phase with a name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tasks: Vec::new(),
        }
    }
}

/// Input to one generation call. Read-only to agents.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// The message being answered
    pub user_message: String,
    /// Project phases (empty if unset)
    pub project_phases: Vec<Phase>,
    /// Coordination hops that led to this call; 0 for a user turn
    pub depth: u32,
}

impl ConversationContext {
    /// Context for a user turn
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            project_phases: Vec::new(),
            depth: 0,
        }
    }

    /// Attach project phases
    #[must_use]
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.project_phases = phases;
        self
    }

    /// Context for a consultation one hop below this one
    #[must_use]
    pub fn consultation(&self, prompt: impl Into<String>) -> Self {
        Self {
            user_message: prompt.into(),
            project_phases: self.project_phases.clone(),
            depth: self.depth + 1,
        }
    }
}

const MARKER_INSTRUCTIONS: &str = "If part of the request needs another specialist, add a line \
`COORDINATE_WITH:<FRONTEND|BACKEND|DATABASE|DEVOPS|UX|ECOMMERCE>:<what you need>` for each one.\n\
If the request is outside your expertise, start your reply with `ESCALATE:`.";

fn role_header(profile: &AgentProfile) -> String {
    let mut out = format!(
        "{} {}\nYou are the {} ({}). {}.\n",
        ROLE_LINE_PREFIX,
        profile.category.as_str(),
        profile.name,
        profile.title,
        profile.description
    );
    out.push_str("\nYour expertise:\n");
    for item in profile.expertise {
        out.push_str(&format!("- {item}\n"));
    }
    out
}

fn phase_block(phases: &[Phase]) -> String {
    if phases.is_empty() {
        return String::new();
    }
    let mut out = String::from("\nProject phases:\n");
    for (i, phase) in phases.iter().enumerate() {
        out.push_str(&format!("{}. {}", i + 1, phase.name));
        if !phase.description.is_empty() {
            out.push_str(&format!(": {}", phase.description));
        }
        out.push('\n');
        for task in &phase.tasks {
            out.push_str(&format!("   - {task}\n"));
        }
    }
    out
}

/// Render the role prompt for a full agent turn
#[must_use]
pub fn render_prompt(profile: &AgentProfile, context: &ConversationContext) -> String {
    format!(
        "{}{}\n{}\n\n{}",
        role_header(profile),
        phase_block(&context.project_phases),
        MARKER_INSTRUCTIONS,
        context.user_message
    )
}

/// Render a prompt for a direct answer (synthesis, guidance): no markers
#[must_use]
pub fn render_direct_prompt(profile: &AgentProfile, request: &str) -> String {
    format!("{}\n{}", role_header(profile), request)
}
