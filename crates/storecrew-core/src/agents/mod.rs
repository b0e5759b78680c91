//! Agents - the seven roles and how they are built
//!
//! - Category / Profile: who the agents are
//! - Context: what an agent is asked
//! - Agent / Specialist: how a turn is answered
//! - Factory: how agents are built on demand
//! - Session: the error-to-apology boundary

mod agent;
mod category;
mod context;
mod factory;
mod profile;
mod session;
mod specialist;

pub use agent::{Agent, BoxedAgent};
pub use category::AgentCategory;
pub use context::{render_direct_prompt, render_prompt, ConversationContext, Phase};
pub use factory::{
    create_agent, create_agent_by_name, AgentFactory, DefaultAgentFactory, SharedAgentFactory,
};
pub use profile::{profile_of, AgentProfile, AgentRegistry};
pub use session::{AgentReply, AgentSession};
pub use specialist::SpecialistAgent;
