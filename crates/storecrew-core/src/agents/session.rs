//! Session boundary
//!
//! The only place errors turn into user-facing text. Everything below this
//! returns `Result`; everything above it gets a string.

use super::category::AgentCategory;
use super::context::{ConversationContext, Phase};
use super::factory::{create_agent, SharedAgentFactory};
use crate::error::UserFriendlyError;
use crate::routing::classify;
use serde::Serialize;
use tracing::{error, info, instrument};

/// Reply delivered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentReply {
    /// Agent that answered
    pub category: AgentCategory,
    /// Reply text
    pub content: String,
}

/// Routes user messages to agents and never fails
#[derive(Clone)]
pub struct AgentSession {
    factory: SharedAgentFactory,
}

impl AgentSession {
    /// Create a session over a factory
    pub fn new(factory: SharedAgentFactory) -> Self {
        Self { factory }
    }

    /// Route a message to the best agent and answer it
    pub async fn reply(&self, message: &str, phases: Vec<Phase>) -> AgentReply {
        let route = classify(message);
        info!(category = %route.category, rule = route.rule, "Routed message");
        self.reply_as(route.category, message, phases).await
    }

    /// Answer a message with a specific agent
    #[instrument(skip(self, message, phases), fields(category = %category))]
    pub async fn reply_as(
        &self,
        category: AgentCategory,
        message: &str,
        phases: Vec<Phase>,
    ) -> AgentReply {
        let agent = create_agent(&self.factory, category);
        let context = ConversationContext::new(message).with_phases(phases);

        let content = match agent.generate_response(&context).await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "Agent failed to respond");
                e.user_message().to_string()
            }
        };
        AgentReply { category, content }
    }
}

impl std::fmt::Debug for AgentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSession").finish_non_exhaustive()
    }
}
