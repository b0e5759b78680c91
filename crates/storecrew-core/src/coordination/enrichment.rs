//! Reply enrichment
//!
//! A plain draft may get one block of tool output appended to it. Rules are
//! checked in table order and the first applicable one decides which tool is
//! called. Tool failures never fail the reply.

use std::time::Duration;
use storecrew_tools::{SharedToolbox, TestKind};
use tracing::{debug, warn};

/// Which enrichment a draft receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrichmentKind {
    /// Code examples for the request
    CodeExamples,
    /// Package information
    PackageInfo,
    /// Test results for code in the draft
    CodeTesting,
    /// Troubleshooting checklist
    Troubleshooting,
    /// Security review of code in the draft
    SecurityCheck,
    /// Best-practice references
    BestPractices,
}

impl EnrichmentKind {
    /// Heading placed above the appended tool output
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::CodeExamples => "Code Examples",
            Self::PackageInfo => "Package Information",
            Self::CodeTesting => "Test Results",
            Self::Troubleshooting => "Troubleshooting",
            Self::SecurityCheck => "Security Review",
            Self::BestPractices => "Best Practices",
        }
    }
}

/// One row of the enrichment table
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentRule {
    /// Enrichment produced when the rule applies
    pub kind: EnrichmentKind,
    /// Predicate over (user message, draft)
    pub applies: fn(&str, &str) -> bool,
}

fn mentions(message: &str, words: &[&str]) -> bool {
    let lower = message.to_lowercase();
    words.iter().any(|w| lower.contains(w))
}

fn wants_examples(message: &str, _draft: &str) -> bool {
    mentions(message, &["example", "sample", "snippet", "show me how"])
}

fn wants_packages(message: &str, _draft: &str) -> bool {
    mentions(message, &["package", "library", "npm", "dependency", "install"])
}

fn wants_tests(message: &str, draft: &str) -> bool {
    mentions(message, &["test", "verify", "validate"]) && first_code_block(draft).is_some()
}

fn wants_troubleshooting(message: &str, _draft: &str) -> bool {
    mentions(
        message,
        &["error", "bug", "issue", "not working", "fails", "broken", "exception"],
    )
}

fn wants_security(message: &str, draft: &str) -> bool {
    mentions(
        message,
        &["secure", "security", "vulnerab", "xss", "csrf", "injection"],
    ) && first_code_block(draft).is_some()
}

fn wants_best_practices(message: &str, _draft: &str) -> bool {
    mentions(
        message,
        &["best practice", "recommend", "should i", "convention", "pattern"],
    )
}

/// Enrichment rules in priority order
pub static ENRICHMENT_RULES: &[EnrichmentRule] = &[
    EnrichmentRule { kind: EnrichmentKind::CodeExamples, applies: wants_examples },
    EnrichmentRule { kind: EnrichmentKind::PackageInfo, applies: wants_packages },
    EnrichmentRule { kind: EnrichmentKind::CodeTesting, applies: wants_tests },
    EnrichmentRule { kind: EnrichmentKind::Troubleshooting, applies: wants_troubleshooting },
    EnrichmentRule { kind: EnrichmentKind::SecurityCheck, applies: wants_security },
    EnrichmentRule { kind: EnrichmentKind::BestPractices, applies: wants_best_practices },
];

/// First applicable enrichment for a message and draft
#[must_use]
pub fn select_enrichment(message: &str, draft: &str) -> Option<EnrichmentKind> {
    ENRICHMENT_RULES
        .iter()
        .find(|rule| (rule.applies)(message, draft))
        .map(|rule| rule.kind)
}

/// Body of the first fenced code block in `text`, without the info string
#[must_use]
pub fn first_code_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim_end())
}

/// Runs the enrichment table against a toolbox
#[derive(Clone)]
pub struct EnrichmentChain {
    toolbox: SharedToolbox,
    enabled: bool,
    tool_timeout: Duration,
}

impl EnrichmentChain {
    /// Create a chain
    pub fn new(toolbox: SharedToolbox, enabled: bool, tool_timeout_ms: u64) -> Self {
        Self {
            toolbox,
            enabled,
            tool_timeout: Duration::from_millis(tool_timeout_ms),
        }
    }

    /// Enrich a draft, or return it unchanged
    pub async fn enrich(&self, message: &str, draft: String) -> String {
        if !self.enabled {
            return draft;
        }
        let Some(kind) = select_enrichment(message, &draft) else {
            return draft;
        };
        debug!(kind = ?kind, "Enriching reply");

        let code = first_code_block(&draft).unwrap_or_default().to_string();
        let call = async {
            match kind {
                EnrichmentKind::CodeExamples => self.toolbox.search_code_examples(message).await,
                EnrichmentKind::PackageInfo => self.toolbox.search_packages(message).await,
                EnrichmentKind::CodeTesting => {
                    self.toolbox.run_tests(&code, TestKind::infer(message)).await
                }
                EnrichmentKind::Troubleshooting => self.toolbox.troubleshoot(message).await,
                EnrichmentKind::SecurityCheck => self.toolbox.check_security(&code).await,
                EnrichmentKind::BestPractices => self.toolbox.search_internet(message).await,
            }
        };

        match tokio::time::timeout(self.tool_timeout, call).await {
            Ok(Ok(extra)) => format!("{}\n\n## {}\n\n{}", draft, kind.heading(), extra.trim()),
            Ok(Err(e)) => {
                warn!(kind = ?kind, error = %e, "Enrichment tool failed");
                draft
            }
            Err(_) => {
                warn!(
                    kind = ?kind,
                    timeout_ms = self.tool_timeout.as_millis() as u64,
                    "Enrichment tool timed out"
                );
                draft
            }
        }
    }
}

impl std::fmt::Debug for EnrichmentChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentChain")
            .field("enabled", &self.enabled)
            .field("tool_timeout", &self.tool_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::sync::Arc;
    use storecrew_tools::{Error as ToolError, Result as ToolResult, Toolbox};

    mock! {
        pub Tools {}

        #[async_trait::async_trait]
        impl Toolbox for Tools {
            async fn search_code_examples(&self, query: &str) -> ToolResult<String>;
            async fn search_packages(&self, name: &str) -> ToolResult<String>;
            async fn search_internet(&self, query: &str) -> ToolResult<String>;
            async fn run_tests(&self, code: &str, kind: TestKind) -> ToolResult<String>;
            async fn troubleshoot(&self, error_text: &str) -> ToolResult<String>;
            async fn check_security(&self, code: &str) -> ToolResult<String>;
        }
    }

    const DRAFT_WITH_CODE: &str = "Try this:\n```js\nconst total = cart.sum();\n```\nDone.";

    #[test]
    fn test_rule_order() {
        assert_eq!(
            select_enrichment("show me an example of package install", ""),
            Some(EnrichmentKind::CodeExamples)
        );
        assert_eq!(
            select_enrichment("which npm library for dates?", ""),
            Some(EnrichmentKind::PackageInfo)
        );
        assert_eq!(
            select_enrichment("please test this, there's a bug", DRAFT_WITH_CODE),
            Some(EnrichmentKind::CodeTesting)
        );
        assert_eq!(
            select_enrichment("please test this, there's a bug", "no code here"),
            Some(EnrichmentKind::Troubleshooting)
        );
        assert_eq!(
            select_enrichment("is this secure?", DRAFT_WITH_CODE),
            Some(EnrichmentKind::SecurityCheck)
        );
        assert_eq!(select_enrichment("is this secure?", "no code"), None);
        assert_eq!(
            select_enrichment("what do you recommend for caching?", ""),
            Some(EnrichmentKind::BestPractices)
        );
        assert_eq!(select_enrichment("hello", DRAFT_WITH_CODE), None);
    }

    #[test]
    fn test_first_code_block() {
        assert_eq!(first_code_block(DRAFT_WITH_CODE), Some("const total = cart.sum();"));
        assert_eq!(first_code_block("no fences"), None);
        assert_eq!(first_code_block("```js\nunterminated"), None);
    }

    #[tokio::test]
    async fn test_enrich_appends_heading() {
        let mut tools = MockTools::new();
        tools
            .expect_search_packages()
            .times(1)
            .returning(|_| Ok("stripe 14.x".to_string()));

        let chain = EnrichmentChain::new(Arc::new(tools), true, 1_000);
        let out = chain
            .enrich("which payment library?", "Use a hosted checkout.".to_string())
            .await;

        assert_eq!(
            out,
            "Use a hosted checkout.\n\n## Package Information\n\nstripe 14.x"
        );
    }

    #[tokio::test]
    async fn test_enrich_passes_code_and_kind_to_tests() {
        let mut tools = MockTools::new();
        tools
            .expect_run_tests()
            .withf(|code: &str, kind: &TestKind| {
                code == "const total = cart.sum();" && *kind == TestKind::Integration
            })
            .times(1)
            .returning(|_, _| Ok("1 passed".to_string()));

        let chain = EnrichmentChain::new(Arc::new(tools), true, 1_000);
        let out = chain
            .enrich("write an integration test", DRAFT_WITH_CODE.to_string())
            .await;

        assert!(out.ends_with("## Test Results\n\n1 passed"));
    }

    #[tokio::test]
    async fn test_tool_failure_returns_draft() {
        let mut tools = MockTools::new();
        tools
            .expect_troubleshoot()
            .times(1)
            .returning(|_| Err(ToolError::Execution("offline".to_string())));

        let chain = EnrichmentChain::new(Arc::new(tools), true, 1_000);
        let out = chain
            .enrich("checkout is broken", "Check the logs.".to_string())
            .await;

        assert_eq!(out, "Check the logs.");
    }

    #[tokio::test]
    async fn test_disabled_chain_never_calls_tools() {
        let tools = MockTools::new();
        let chain = EnrichmentChain::new(Arc::new(tools), false, 1_000);
        let out = chain
            .enrich("show me an example", "Draft".to_string())
            .await;

        assert_eq!(out, "Draft");
    }
}
