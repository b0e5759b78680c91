//! Agent factory
//!
//! Agents are built on demand, one per call. The coordinator holds the
//! factory it came from so a consultation or escalation can build the next
//! agent without any agent knowing about the others.

use super::agent::BoxedAgent;
use super::category::AgentCategory;
use super::profile::profile_of;
use super::specialist::SpecialistAgent;
use crate::config::CoreConfig;
use crate::coordination::{Coordinator, EnrichmentChain};
use crate::manager::{new_project_store, HeuristicEnhancer, ManagerAgent, ProjectStore, SharedEnhancer};
use std::sync::Arc;
use storecrew_llm::{SharedGenerator, TimeoutGenerator};
use storecrew_tools::SharedToolbox;
use tracing::debug;

/// Builds agents by category
pub trait AgentFactory: Send + Sync {
    /// Create an agent for the category
    fn create(self: Arc<Self>, category: AgentCategory) -> BoxedAgent;
}

/// Shared factory handle
pub type SharedAgentFactory = Arc<dyn AgentFactory>;

/// Create an agent from a shared factory
pub fn create_agent(factory: &SharedAgentFactory, category: AgentCategory) -> BoxedAgent {
    factory.clone().create(category)
}

/// Create an agent by category id or tag, defaulting to the Manager
pub fn create_agent_by_name(factory: &SharedAgentFactory, name: &str) -> BoxedAgent {
    create_agent(factory, AgentCategory::from_name_or_manager(name))
}

/// Factory wiring agents to a generator, a toolbox and shared project state
pub struct DefaultAgentFactory {
    generator: SharedGenerator,
    toolbox: SharedToolbox,
    config: CoreConfig,
    store: ProjectStore,
    enhancer: Option<SharedEnhancer>,
}

impl DefaultAgentFactory {
    /// Create a factory. Every generation call is bounded by
    /// `generation_timeout_ms`.
    pub fn new(generator: SharedGenerator, toolbox: SharedToolbox, config: CoreConfig) -> Self {
        let generator: SharedGenerator = Arc::new(TimeoutGenerator::new(
            generator,
            config.generation_timeout_ms,
        ));
        let enhancer: Option<SharedEnhancer> = if config.use_enhanced_extractor {
            Some(Arc::new(HeuristicEnhancer::new(config.max_document_bytes)))
        } else {
            None
        };
        Self {
            generator,
            toolbox,
            config,
            store: new_project_store(),
            enhancer,
        }
    }

    /// Replace the task graph enhancer (`None` disables it)
    #[must_use]
    pub fn with_enhancer(mut self, enhancer: Option<SharedEnhancer>) -> Self {
        self.enhancer = enhancer;
        self
    }

    /// Handle to the shared project state
    pub fn store(&self) -> ProjectStore {
        self.store.clone()
    }

    /// Build the Manager with its concrete type
    pub fn manager(self: &Arc<Self>) -> ManagerAgent {
        ManagerAgent::new(
            self.generator.clone(),
            self.coordinator(),
            self.store.clone(),
            self.enhancer.clone(),
            self.config.clone(),
        )
    }

    fn coordinator(self: &Arc<Self>) -> Coordinator {
        Coordinator::new(
            self.clone() as SharedAgentFactory,
            EnrichmentChain::new(
                self.toolbox.clone(),
                self.config.enable_enrichment,
                self.config.tool_timeout_ms,
            ),
            self.config.max_coordination_depth,
        )
    }
}

impl AgentFactory for DefaultAgentFactory {
    fn create(self: Arc<Self>, category: AgentCategory) -> BoxedAgent {
        debug!(category = %category, "Creating agent");
        match category {
            AgentCategory::Manager => Box::new(self.manager()),
            specialist => Box::new(SpecialistAgent::new(
                profile_of(specialist),
                self.generator.clone(),
                self.coordinator(),
            )),
        }
    }
}

impl std::fmt::Debug for DefaultAgentFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAgentFactory")
            .field("generator", &self.generator.name())
            .field("config", &self.config)
            .field("enhancer", &self.enhancer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storecrew_llm::ScriptedGenerator;
    use storecrew_tools::OfflineToolbox;

    fn factory() -> SharedAgentFactory {
        Arc::new(DefaultAgentFactory::new(
            Arc::new(ScriptedGenerator::new()),
            Arc::new(OfflineToolbox::new()),
            CoreConfig::default(),
        ))
    }

    #[test]
    fn test_create_each_category() {
        let factory = factory();
        for category in AgentCategory::ALL {
            let agent = create_agent(&factory, category);
            assert_eq!(agent.category(), category);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_manager() {
        let factory = factory();
        assert_eq!(
            create_agent_by_name(&factory, "legal").category(),
            AgentCategory::Manager
        );
        assert_eq!(
            create_agent_by_name(&factory, "DB").category(),
            AgentCategory::Database
        );
        assert_eq!(
            create_agent_by_name(&factory, "devops").category(),
            AgentCategory::DevOps
        );
    }

    #[test]
    fn test_agents_share_project_store() {
        let factory = Arc::new(DefaultAgentFactory::new(
            Arc::new(ScriptedGenerator::new()),
            Arc::new(OfflineToolbox::new()),
            CoreConfig::default(),
        ));
        let a = factory.manager();
        let b = factory.manager();
        assert!(Arc::ptr_eq(a.store(), b.store()));
    }
}
