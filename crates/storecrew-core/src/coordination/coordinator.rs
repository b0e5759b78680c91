//! Coordinator - post-processing shared by every agent turn
//!
//! After an agent has a draft, the coordinator decides what the user gets:
//! a coordinated plan, an escalated answer, an enriched draft, or the draft
//! itself, in that order of precedence.

use super::dependency::{detect_dependencies_for, DependencyInfo};
use super::enrichment::EnrichmentChain;
use super::escalation::{is_agent_stuck, strip_escalation_prefix};
use crate::agents::{AgentCategory, AgentProfile, ConversationContext, SharedAgentFactory};
use crate::error::Result;
use tracing::{debug, info, instrument, warn};

/// Placeholder used in synthesis input when a consultation fails
pub fn consultation_placeholder(agent_name: &str) -> String {
    format!("Could not retrieve input from the {agent_name}.")
}

/// Applies coordination, escalation and enrichment to agent drafts
#[derive(Clone)]
pub struct Coordinator {
    factory: SharedAgentFactory,
    enrichment: EnrichmentChain,
    max_depth: u32,
}

impl Coordinator {
    /// Create a coordinator
    pub fn new(factory: SharedAgentFactory, enrichment: EnrichmentChain, max_depth: u32) -> Self {
        Self {
            factory,
            enrichment,
            max_depth,
        }
    }

    /// Turn a draft into the final reply
    #[instrument(skip(self, acting, context, draft), fields(agent = %acting.category, depth = context.depth))]
    pub async fn finalize(
        &self,
        acting: &'static AgentProfile,
        context: &ConversationContext,
        draft: String,
    ) -> Result<String> {
        let deps = detect_dependencies_for(Some(acting.category), &draft, &context.user_message);
        if deps.has_dependencies {
            if context.depth < self.max_depth {
                return self.coordinate(acting, context, &draft, &deps).await;
            }
            debug!(
                max_depth = self.max_depth,
                "Coordination depth reached, answering without consultation"
            );
        }

        if is_agent_stuck(&draft) {
            return self.escalate(acting, context, &draft).await;
        }

        Ok(self.enrichment.enrich(&context.user_message, draft).await)
    }

    /// Consult each dependent agent in order, then have the Manager synthesize
    pub async fn coordinate(
        &self,
        acting: &'static AgentProfile,
        context: &ConversationContext,
        draft: &str,
        deps: &DependencyInfo,
    ) -> Result<String> {
        if !deps.has_dependencies || acting.category == AgentCategory::Manager {
            return self.escalate(acting, context, draft).await;
        }
        info!(
            initiator = %acting.category,
            agents = ?deps.dependent_agents,
            "Coordinating with other agents"
        );

        let request = consultation_prompt(acting.name, &context.user_message, &deps.dependency_details);
        let mut sections = Vec::with_capacity(deps.dependent_agents.len());
        for category in &deps.dependent_agents {
            let agent = self.factory.clone().create(*category);
            let name = agent.profile().name;
            let reply = match agent.generate_response(&context.consultation(request.clone())).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(agent = %category, error = %e, "Consultation failed");
                    consultation_placeholder(name)
                }
            };
            sections.push((name, reply));
        }

        let prompt = synthesis_prompt(&context.user_message, &sections, acting.name, draft);
        let manager = self.factory.clone().create(AgentCategory::Manager);
        let synthesis = manager.direct_answer(&prompt).await?;

        let consulted: Vec<&str> = sections.iter().map(|(name, _)| *name).collect();
        let footer = if consulted.is_empty() {
            format!("*Coordinated by the {}.*", acting.name)
        } else {
            format!(
                "*Coordinated by the {} with input from the {}.*",
                acting.name,
                consulted.join(", the ")
            )
        };
        Ok(format!(
            "# Coordinated Development Plan\n\n{}\n\n---\n{footer}",
            synthesis.trim()
        ))
    }

    /// Hand a stuck draft to the Manager, or close out if the Manager is stuck
    pub async fn escalate(
        &self,
        acting: &'static AgentProfile,
        context: &ConversationContext,
        draft: &str,
    ) -> Result<String> {
        let attempt = strip_escalation_prefix(draft);

        if acting.category == AgentCategory::Manager {
            debug!("Manager cannot escalate further, asking the user for details");
            return Ok(format!(
                "I need more information to answer this fully.\n\n{attempt}\n\nCould you share more details about your requirements?"
            ));
        }

        info!(agent = %acting.category, "Escalating to the Development Manager");
        let manager = self.factory.clone().create(AgentCategory::Manager);
        let guidance = manager
            .direct_answer(&guidance_prompt(acting.name, &context.user_message, &attempt))
            .await?;

        Ok(format!(
            "I consulted with the Development Manager on this question.\n\n{}",
            guidance.trim()
        ))
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("enrichment", &self.enrichment)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

fn consultation_prompt(initiator: &str, request: &str, details: &str) -> String {
    format!(
        "The {initiator} needs your input on a request.\n\nOriginal request: {request}\n\nSpecific needs: {}\n\nAnswer only the part that falls within your expertise.",
        details.trim()
    )
}

fn synthesis_prompt(request: &str, sections: &[(&str, String)], initiator: &str, draft: &str) -> String {
    let mut prompt = format!("Create a coordinated development plan.\n\nOriginal request: {request}\n");
    for (name, reply) in sections {
        prompt.push_str(&format!("\n## {name} Input\n{}\n", reply.trim()));
    }
    prompt.push_str(&format!("\n## {initiator} Assessment\n{}\n", draft.trim()));
    prompt.push_str(
        "\nCover: the order of implementation steps, cross-team dependencies, and integration points.",
    );
    prompt
}

fn guidance_prompt(agent_name: &str, question: &str, attempt: &str) -> String {
    format!(
        "The {agent_name} could not fully answer a question.\n\nQuestion: {question}\n\nTheir attempt: {attempt}\n\nGive the user clear guidance on how to proceed."
    )
}
