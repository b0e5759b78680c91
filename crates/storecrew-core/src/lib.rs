//! Storecrew Core - Agent Team Coordination
//!
//! This crate provides the agent team for e-commerce software projects:
//! - Agents: seven roles, built on demand through a factory
//! - Routing: ordered keyword rules that pick an agent for a message
//! - Coordination: cross-team consultation, escalation and enrichment
//! - Manager: requirements parsing, task assignment and summaries
//! - Security: pattern-based code audit and compliance checks

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agents;
pub mod config;
pub mod coordination;
pub mod error;
pub mod manager;
pub mod routing;
pub mod security;

pub use agents::{
    create_agent, create_agent_by_name, profile_of, Agent, AgentCategory, AgentFactory, AgentProfile,
    AgentRegistry, AgentReply, AgentSession, ConversationContext, DefaultAgentFactory, Phase,
    SharedAgentFactory,
};
pub use config::CoreConfig;
pub use coordination::{
    detect_dependencies, detect_dependencies_for, is_agent_stuck, Coordinator, DependencyInfo,
};
pub use error::{Error, Result, UserFriendlyError, APOLOGY_MESSAGE, PARSE_ERROR_MESSAGE};
pub use manager::{ManagerAgent, ProjectState, Task, TaskAssignmentMap};
pub use routing::{categorize_task, classify, determine_agent_type, RouteMatch};
pub use security::{audit_code, check_compliance, ComplianceStandard, SecurityReport};
