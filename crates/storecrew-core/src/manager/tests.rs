use super::*;
use crate::agents::{Agent, ConversationContext, DefaultAgentFactory};
use crate::config::CoreConfig;
use crate::error::{Error, Result, PARSE_ERROR_MESSAGE};
use std::sync::Arc;
use storecrew_llm::{ScriptedGenerator, SharedGenerator};
use storecrew_tools::OfflineToolbox;

const REQUIREMENTS: &str = "\
# Product catalog
Must support variants
## Catalog search API endpoint
## Review meeting
# Postgres tables
# Docker deployment
";

fn config() -> CoreConfig {
    CoreConfig {
        enable_enrichment: false,
        ..CoreConfig::default()
    }
}

fn manager_with(config: CoreConfig) -> (Arc<ScriptedGenerator>, ManagerAgent) {
    let generator = Arc::new(ScriptedGenerator::new());
    let factory = Arc::new(DefaultAgentFactory::new(
        generator.clone() as SharedGenerator,
        Arc::new(OfflineToolbox::new()),
        config,
    ));
    (generator, factory.manager())
}

struct FailingEnhancer;

#[async_trait::async_trait]
impl TaskGraphEnhancer for FailingEnhancer {
    async fn extract_tasks_with_dependencies(&self, _markdown: &str) -> Result<Vec<Task>> {
        Err(Error::Internal("enhancer unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_document_produces_enhanced_summary() {
    let (generator, manager) = manager_with(config());

    let reply = manager
        .generate_response(&ConversationContext::new(REQUIREMENTS))
        .await
        .unwrap();

    assert!(reply.starts_with("# Project Requirements Summary"));
    assert!(reply.contains("**Tasks:** 3 top-level, 2 subtasks"));
    assert!(reply.contains("## E-commerce Specialist (3)"));
    assert!(reply.contains("## Dependency Analysis"));
    assert!(reply.contains("## Critical Path"));
    assert_eq!(generator.call_count(), 0);

    let state = manager.project().await.unwrap();
    assert_eq!(state.tasks.len(), 3);
    assert!(state.graph.is_some());
    assert_eq!(state.tasks[2].dependencies, vec!["task-1", "task-2"]);
}

#[tokio::test]
async fn test_new_document_replaces_state() {
    let (_, manager) = manager_with(config());

    manager.process_markdown(REQUIREMENTS).await;
    manager.process_markdown("# React components\n- header").await;

    let state = manager.project().await.unwrap();
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.requirements, "# React components\n- header");
    assert_eq!(state.assignments.total(), 1);
}

#[tokio::test]
async fn test_enhancer_failure_falls_back_to_basic() {
    let generator = Arc::new(ScriptedGenerator::new());
    let factory = Arc::new(
        DefaultAgentFactory::new(
            generator as SharedGenerator,
            Arc::new(OfflineToolbox::new()),
            config(),
        )
        .with_enhancer(Some(Arc::new(FailingEnhancer))),
    );
    let manager = factory.manager();

    let summary = manager.process_markdown(REQUIREMENTS).await;

    assert!(summary.starts_with("# Project Requirements Summary"));
    assert!(!summary.contains("## Dependency Analysis"));
    let state = manager.project().await.unwrap();
    assert_eq!(state.tasks.len(), 3);
    assert!(state.graph.is_none());
}

#[tokio::test]
async fn test_parse_failure_empties_state() {
    let (_, manager) = manager_with(CoreConfig {
        max_document_bytes: 10,
        ..config()
    });

    let reply = manager.process_markdown(REQUIREMENTS).await;

    assert_eq!(reply, PARSE_ERROR_MESSAGE);
    let state = manager.project().await.unwrap();
    assert!(state.tasks.is_empty());
    assert_eq!(manager.task_overview().await, NO_PROJECT_MESSAGE);
}

#[tokio::test]
async fn test_task_overview() {
    let (generator, manager) = manager_with(config());
    let ctx = ConversationContext::new("what is the progress on my tasks?");

    assert_eq!(manager.generate_response(&ctx).await.unwrap(), NO_PROJECT_MESSAGE);

    manager.process_markdown(REQUIREMENTS).await;
    let overview = manager.generate_response(&ctx).await.unwrap();
    assert!(overview.contains("## Database Architect (1)"));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_security_with_code_runs_locally() {
    let (generator, manager) = manager_with(config());
    let message = "Please do a security audit for OWASP:\n```js\nconst q = \"SELECT * FROM users WHERE id = \" + id;\n```";

    let reply = manager
        .generate_response(&ConversationContext::new(message))
        .await
        .unwrap();

    assert!(reply.starts_with("## Security Review"));
    assert!(reply.contains("Possible SQL injection"));
    assert!(reply.contains("## OWASP Compliance:"));
    assert!(!reply.contains("GDPR"));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_security_without_code_uses_generator() {
    let (generator, manager) = manager_with(config());
    generator.push_response("Add rate limiting and rotate keys.");

    let reply = manager
        .generate_response(&ConversationContext::new("review our security posture"))
        .await
        .unwrap();

    assert_eq!(reply, "Add rate limiting and rotate keys.");
    let prompts = generator.prompts();
    assert!(prompts[0].contains("Review the security posture and list concrete controls"));
    assert!(prompts[0].ends_with("review our security posture"));
}

#[tokio::test]
async fn test_stuck_manager_asks_user() {
    let (generator, manager) = manager_with(config());
    generator.push_response("ESCALATE: I don't have enough information about your budget.");

    let reply = manager
        .generate_response(&ConversationContext::new("hello"))
        .await
        .unwrap();

    assert!(reply.starts_with("I need more information to answer this fully."));
    assert!(reply.contains("I don't have enough information about your budget."));
    assert!(!reply.contains("ESCALATE:"));
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_direct_answer_has_no_marker_instructions() {
    let (generator, manager) = manager_with(config());

    manager.direct_answer("Synthesize the plan").await.unwrap();

    let prompt = &generator.prompts()[0];
    assert!(prompt.starts_with("ROLE: manager"));
    assert!(!prompt.contains("COORDINATE_WITH"));
    assert!(prompt.ends_with("Synthesize the plan"));
}

#[tokio::test]
async fn test_generation_error_propagates() {
    let (generator, manager) = manager_with(config());
    generator.push_error("upstream down");

    let err = manager
        .generate_response(&ConversationContext::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Llm(_)));
}
