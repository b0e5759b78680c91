//! `ask` and `classify` commands

use super::offline_factory;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use storecrew_core::{
    profile_of, AgentCategory, AgentRegistry, AgentSession, Phase, SharedAgentFactory,
};

/// Route (or force) a message and print the reply
pub async fn run(
    config: &AppConfig,
    message: &str,
    agent: Option<&str>,
    phases: Option<&Path>,
) -> Result<()> {
    let phases = match phases {
        Some(path) => load_phases(path)?,
        None => Vec::new(),
    };
    let factory: SharedAgentFactory = offline_factory(config);
    let session = AgentSession::new(factory);

    let reply = match agent {
        Some(name) => {
            session
                .reply_as(AgentCategory::from_name_or_manager(name), message, phases)
                .await
        }
        None => session.reply(message, phases).await,
    };

    println!("[{}]\n", profile_of(reply.category).name);
    println!("{}", reply.content);
    Ok(())
}

/// Print the routed category and the rule that matched
pub fn classify(message: &str) {
    let route = storecrew_core::classify(message);
    println!(
        "{} ({}) via rule '{}'",
        profile_of(route.category).name,
        route.category,
        route.rule
    );

    let capable = AgentRegistry::global().capable_of(message);
    if !capable.is_empty() {
        let names: Vec<&str> = capable.iter().map(|c| profile_of(*c).name).collect();
        println!("Also relevant: {}", names.join(", "));
    }
}

fn load_phases(path: &Path) -> Result<Vec<Phase>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read phases file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse phases file {}", path.display()))
}
