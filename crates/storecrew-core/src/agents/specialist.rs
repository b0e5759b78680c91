//! Specialist agents
//!
//! All six specialists share one implementation; the profile decides the
//! role prompt and vocabulary.

use super::agent::Agent;
use super::context::{render_direct_prompt, render_prompt, ConversationContext};
use super::profile::AgentProfile;
use crate::coordination::Coordinator;
use crate::error::Result;
use async_trait::async_trait;
use storecrew_llm::SharedGenerator;
use tracing::debug;

/// A specialist role backed by a text generator
pub struct SpecialistAgent {
    profile: &'static AgentProfile,
    generator: SharedGenerator,
    coordinator: Coordinator,
}

impl SpecialistAgent {
    /// Create a specialist
    pub fn new(
        profile: &'static AgentProfile,
        generator: SharedGenerator,
        coordinator: Coordinator,
    ) -> Self {
        Self {
            profile,
            generator,
            coordinator,
        }
    }
}

#[async_trait]
impl Agent for SpecialistAgent {
    fn profile(&self) -> &'static AgentProfile {
        self.profile
    }

    async fn generate_response(&self, context: &ConversationContext) -> Result<String> {
        let prompt = render_prompt(self.profile, context);
        let draft = self.generator.generate(&prompt).await?;
        debug!(agent = %self.profile.category, chars = draft.len(), "Draft generated");

        self.coordinator.finalize(self.profile, context, draft).await
    }

    async fn direct_answer(&self, prompt: &str) -> Result<String> {
        let prompt = render_direct_prompt(self.profile, prompt);
        Ok(self.generator.generate(&prompt).await?)
    }
}
