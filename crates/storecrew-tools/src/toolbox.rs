//! Toolbox - enrichment collaborator trait
//!
//! Each method returns enrichment text that an agent appends to its reply.
//! Every method may fail; callers decide how to degrade.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of test run requested for a code sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Unit tests
    Unit,
    /// Integration tests
    Integration,
    /// Accessibility checks
    Accessibility,
    /// Performance checks
    Performance,
}

impl TestKind {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::Accessibility => "accessibility",
            Self::Performance => "performance",
        }
    }

    /// Infer the kind of test from free text
    #[must_use]
    pub fn infer(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("integration") || lower.contains("end-to-end") || lower.contains("e2e") {
            Self::Integration
        } else if lower.contains("accessib") || lower.contains("a11y") {
            Self::Accessibility
        } else if lower.contains("performance") || lower.contains("load test") {
            Self::Performance
        } else {
            Self::Unit
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Enrichment tools available to agents
#[async_trait::async_trait]
pub trait Toolbox: Send + Sync {
    /// Search for code examples matching a query
    async fn search_code_examples(&self, query: &str) -> Result<String>;

    /// Look up information about a package
    async fn search_packages(&self, name: &str) -> Result<String>;

    /// General web search
    async fn search_internet(&self, query: &str) -> Result<String>;

    /// Run tests of the given kind against a code sample
    async fn run_tests(&self, code: &str, kind: TestKind) -> Result<String>;

    /// Suggest fixes for an error description
    async fn troubleshoot(&self, error_text: &str) -> Result<String>;

    /// Review a code sample for security problems
    async fn check_security(&self, code: &str) -> Result<String>;
}

/// Shared toolbox handle
pub type SharedToolbox = Arc<dyn Toolbox>;
