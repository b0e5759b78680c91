//! The Development Manager
//!
//! Besides the shared coordinator flow, the Manager owns the project state
//! built from requirements documents and answers security and task
//! questions locally.

use super::graph::{DependencyGraph, SharedEnhancer};
use super::intent::ManagerIntent;
use super::state::{ProjectState, ProjectStore};
use super::summary::enhanced_summary;
use super::tasks::{extract_tasks, Task};
use crate::agents::{
    profile_of, render_direct_prompt, render_prompt, Agent, AgentCategory, AgentProfile,
    ConversationContext,
};
use crate::config::CoreConfig;
use crate::coordination::{first_code_block, Coordinator};
use crate::error::{Result, PARSE_ERROR_MESSAGE};
use crate::security::{audit_code, check_compliance, ComplianceStandard};
use async_trait::async_trait;
use storecrew_llm::SharedGenerator;
use tracing::{debug, error, info, instrument, warn};

/// Reply to task questions before any document was processed
pub const NO_PROJECT_MESSAGE: &str = "No requirements document has been processed yet. \
Paste a markdown document with '# ' headings for epics and '## ' headings for subtasks, \
and I will break it down and assign the work to the team.";

/// The Manager agent
pub struct ManagerAgent {
    generator: SharedGenerator,
    coordinator: Coordinator,
    store: ProjectStore,
    enhancer: Option<SharedEnhancer>,
    config: CoreConfig,
}

impl ManagerAgent {
    /// Create a Manager
    pub fn new(
        generator: SharedGenerator,
        coordinator: Coordinator,
        store: ProjectStore,
        enhancer: Option<SharedEnhancer>,
        config: CoreConfig,
    ) -> Self {
        Self {
            generator,
            coordinator,
            store,
            enhancer,
            config,
        }
    }

    /// Shared project state
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Snapshot of the current project
    pub async fn project(&self) -> Option<ProjectState> {
        self.store.read().await.clone()
    }

    /// Parse a requirements document, replace the project state and
    /// return a summary
    #[instrument(skip_all, fields(bytes = markdown.len()))]
    pub async fn process_markdown(&self, markdown: &str) -> String {
        let state = match self.extract(markdown).await {
            Ok((tasks, graph)) => ProjectState::new(markdown, tasks, graph),
            Err(e) => {
                error!(error = %e, "Failed to process requirements document");
                *self.store.write().await = Some(ProjectState::empty(markdown));
                return PARSE_ERROR_MESSAGE.to_string();
            }
        };
        info!(
            tasks = state.tasks.len(),
            subtasks = state.subtask_count(),
            graph = state.graph.is_some(),
            "Requirements processed"
        );

        let summary = self.summarize(&state);
        *self.store.write().await = Some(state);
        summary
    }

    /// Summary of the current project, or how to start one
    pub async fn task_overview(&self) -> String {
        match self.store.read().await.as_ref() {
            Some(state) if !state.tasks.is_empty() => self.summarize(state),
            _ => NO_PROJECT_MESSAGE.to_string(),
        }
    }

    fn summarize(&self, state: &ProjectState) -> String {
        enhanced_summary(
            state,
            self.config.summary_preview_limit,
            self.config.critical_path_size,
        )
    }

    async fn extract(&self, markdown: &str) -> Result<(Vec<Task>, Option<DependencyGraph>)> {
        if let Some(enhancer) = &self.enhancer {
            match enhancer.extract_tasks_with_dependencies(markdown).await {
                Ok(tasks) => {
                    let graph = enhancer.generate_dependency_graph(&tasks);
                    return Ok((tasks, Some(graph)));
                }
                Err(e) => warn!(error = %e, "Enhanced extraction failed, using basic parser"),
            }
        }
        let tasks = extract_tasks(markdown, self.config.max_document_bytes)?;
        Ok((tasks, None))
    }

    async fn answer_with_intent(
        &self,
        context: &ConversationContext,
        intent: ManagerIntent,
    ) -> Result<String> {
        let mut prompt_context = context.clone();
        if let Some(header) = intent.prompt_header() {
            prompt_context.user_message = format!("{header}\n\n{}", context.user_message);
        }
        let draft = self
            .generator
            .generate(&render_prompt(self.profile(), &prompt_context))
            .await?;
        self.coordinator.finalize(self.profile(), context, draft).await
    }
}

/// Security report for code in a message, plus compliance for any standard
/// the message names
pub fn security_review(message: &str, code: &str) -> String {
    let mut out = audit_code(code).to_markdown();
    for standard in ComplianceStandard::mentioned_in(message) {
        out.push('\n');
        out.push_str(&check_compliance(code, standard).to_markdown());
    }
    out
}

#[async_trait]
impl Agent for ManagerAgent {
    fn profile(&self) -> &'static AgentProfile {
        profile_of(AgentCategory::Manager)
    }

    async fn generate_response(&self, context: &ConversationContext) -> Result<String> {
        let intent = ManagerIntent::detect(&context.user_message);
        debug!(intent = ?intent, "Manager intent");

        match intent {
            ManagerIntent::FileUpload => Ok(self.process_markdown(&context.user_message).await),
            ManagerIntent::TaskManagement => Ok(self.task_overview().await),
            ManagerIntent::Security => match first_code_block(&context.user_message) {
                Some(code) => Ok(security_review(&context.user_message, code)),
                None => self.answer_with_intent(context, intent).await,
            },
            _ => self.answer_with_intent(context, intent).await,
        }
    }

    async fn direct_answer(&self, prompt: &str) -> Result<String> {
        let prompt = render_direct_prompt(self.profile(), prompt);
        Ok(self.generator.generate(&prompt).await?)
    }
}
