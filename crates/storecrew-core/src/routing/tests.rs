use super::*;
use crate::agents::AgentCategory;

#[test]
fn test_ecommerce_beats_devops() {
    assert_eq!(
        determine_agent_type("set up a github pipeline for our shopping cart"),
        AgentCategory::Ecommerce
    );
}

#[test]
fn test_default_is_manager() {
    let route = classify("hello there");
    assert_eq!(route.category, AgentCategory::Manager);
    assert_eq!(route.rule, DEFAULT_RULE);
}

#[test]
fn test_precedence_chain() {
    // each message carries its own keyword plus every lower-priority one
    let cases = [
        ("docker css api schema wireframe", AgentCategory::DevOps),
        ("css api schema wireframe", AgentCategory::Frontend),
        ("api schema wireframe", AgentCategory::Backend),
        ("schema wireframe", AgentCategory::Database),
        ("wireframe for the signup", AgentCategory::Ux),
    ];
    for (message, expected) in cases {
        assert_eq!(determine_agent_type(message), expected, "{message}");
    }
}

#[test]
fn test_case_insensitive() {
    assert_eq!(determine_agent_type("Fix the REACT Layout"), AgentCategory::Frontend);
    assert_eq!(determine_agent_type("WRITE A SQL QUERY"), AgentCategory::Database);
}

#[test]
fn test_short_tokens_need_word_boundaries() {
    // "pr" inside "improve", "ui" inside "build" must not route
    assert_eq!(determine_agent_type("improve the wording"), AgentCategory::Manager);
    assert_eq!(determine_agent_type("open a PR"), AgentCategory::DevOps);
}

#[test]
fn test_build_intent_sub_signals() {
    let route = classify("build a marketplace where artists sell prints");
    assert_eq!(route.category, AgentCategory::Ecommerce);
    assert_eq!(route.rule, "build_ecommerce");

    assert_eq!(classify("create a landing page").rule, "build_frontend");
    assert_eq!(classify("implement the pricing logic").category, AgentCategory::Ecommerce);
    assert_eq!(classify("implement the webhook logic").rule, "build_backend");
    assert_eq!(classify("generate sample data").rule, "build_database");
}

#[test]
fn test_build_without_sub_signal_falls_through() {
    assert_eq!(classify("make it happen this sprint").rule, "project");
    assert_eq!(classify("build something nice").rule, DEFAULT_RULE);
}

#[test]
fn test_project_management_rule() {
    let route = classify("what is the timeline for phase two");
    assert_eq!(route.category, AgentCategory::Manager);
    assert_eq!(route.rule, "project");
}

#[test]
fn test_rule_table_order() {
    let names: Vec<_> = routing_rules().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "ecommerce",
            "devops",
            "frontend",
            "backend",
            "database",
            "ux",
            "build_ecommerce",
            "build_frontend",
            "build_backend",
            "build_database",
            "project",
        ]
    );
}

#[test]
fn test_categorize_task_fallback() {
    assert_eq!(categorize_task("Kickoff meeting with stakeholders"), AgentCategory::Manager);
    assert_eq!(categorize_task("Product catalog"), AgentCategory::Ecommerce);
    assert_eq!(categorize_task("User authentication"), AgentCategory::Backend);
}
