//! CLI module for storecrew
//!
//! Provides commands:
//! - `ask`: route a message to an agent and print the reply
//! - `classify`: show which agent a message routes to
//! - `plan`: process a requirements document
//! - `audit`: run the security and compliance checks on a file
//! - `agents`: list the agent team

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use storecrew_core::security::ComplianceStandard;
use storecrew_core::DefaultAgentFactory;
use storecrew_llm::TemplateGenerator;
use storecrew_tools::OfflineToolbox;

pub mod agents;
pub mod ask;
pub mod audit;
pub mod plan;

/// Storecrew CLI
#[derive(Parser, Debug)]
#[command(name = "storecrew")]
#[command(about = "Agent team for e-commerce software projects")]
#[command(version)]
pub struct Cli {
    /// Extra configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the team a question
    Ask {
        /// The message
        message: String,
        /// Answer with this agent instead of routing (e.g. backend, ux)
        #[arg(long)]
        agent: Option<String>,
        /// JSON file with project phases
        #[arg(long)]
        phases: Option<PathBuf>,
    },
    /// Show which agent a message routes to
    Classify {
        /// The message
        message: String,
    },
    /// Process a requirements document
    Plan {
        /// Markdown file
        file: PathBuf,
        /// Print tasks and assignments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Audit a source file
    Audit {
        /// Source file
        file: PathBuf,
        /// Also check compliance (owasp or gdpr)
        #[arg(long, value_parser = parse_standard)]
        standard: Option<ComplianceStandard>,
    },
    /// List the agent team
    Agents,
}

fn parse_standard(value: &str) -> Result<ComplianceStandard, String> {
    ComplianceStandard::parse(value).ok_or_else(|| format!("unknown standard '{value}'"))
}

/// Factory backed by the offline generator and toolbox
pub(crate) fn offline_factory(config: &AppConfig) -> Arc<DefaultAgentFactory> {
    Arc::new(DefaultAgentFactory::new(
        Arc::new(TemplateGenerator::new()),
        Arc::new(OfflineToolbox::new()),
        config.core.clone(),
    ))
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Ask {
            message,
            agent,
            phases,
        }) => ask::run(&config, &message, agent.as_deref(), phases.as_deref()).await,
        Some(Commands::Classify { message }) => {
            ask::classify(&message);
            Ok(())
        }
        Some(Commands::Plan { file, json }) => plan::run(&config, &file, json).await,
        Some(Commands::Audit { file, standard }) => audit::run(&file, standard),
        Some(Commands::Agents) => {
            agents::run();
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_agent() {
        let cli = Cli::parse_from(["storecrew", "ask", "hello", "--agent", "ux"]);
        match cli.command {
            Some(Commands::Ask { message, agent, .. }) => {
                assert_eq!(message, "hello");
                assert_eq!(agent.as_deref(), Some("ux"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_audit_standard() {
        let cli = Cli::parse_from(["storecrew", "audit", "app.js", "--standard", "GDPR"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Audit {
                standard: Some(ComplianceStandard::Gdpr),
                ..
            })
        ));

        assert!(Cli::try_parse_from(["storecrew", "audit", "app.js", "--standard", "pci"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["storecrew", "--json-logs", "plan", "reqs.md", "--json"]);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Some(Commands::Plan { json: true, .. })));
    }
}
