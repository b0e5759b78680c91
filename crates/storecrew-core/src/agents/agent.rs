//! Agent trait

use super::category::AgentCategory;
use super::context::ConversationContext;
use super::profile::AgentProfile;
use crate::error::Result;
use async_trait::async_trait;

/// A role-specialized responder
#[async_trait]
pub trait Agent: Send + Sync {
    /// Static profile of this agent
    fn profile(&self) -> &'static AgentProfile;

    /// Category of this agent
    fn category(&self) -> AgentCategory {
        self.profile().category
    }

    /// Full turn: generate a draft, then coordinate, escalate or enrich it
    async fn generate_response(&self, context: &ConversationContext) -> Result<String>;

    /// Answer a prompt directly, without markers or post-processing
    async fn direct_answer(&self, prompt: &str) -> Result<String>;
}

/// Owned agent handle
pub type BoxedAgent = Box<dyn Agent>;
