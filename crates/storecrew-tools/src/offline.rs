//! Offline toolbox
//!
//! Deterministic `Toolbox` that answers from built-in tables. Used by the CLI
//! and by tests that need real enrichment text without a network.

use crate::doctor::diagnose;
use crate::error::{Error, Result};
use crate::packages::{find_package, packages_for, PackageInfo, DEFAULT_PACKAGES};
use crate::toolbox::{TestKind, Toolbox};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Word-ish tokens that may name a package (scoped names included)
static PACKAGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@?[a-z0-9][a-z0-9._-]*(?:/[a-z0-9._-]+)?")
        .expect("PACKAGE_TOKEN is a compile-time constant")
});

/// Markers that show a sample contains tests
static TEST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(describe|it|test|expect)\s*\(|#\[test\]|def test_")
        .expect("TEST_MARKER is a compile-time constant")
});

/// Substrings that should never appear in shipped code
const SECRET_MARKERS: &[(&str, &str)] = &[
    ("PRIVATE KEY-----", "Private key material"),
    ("AKIA", "AWS access key id"),
    ("aws_secret_access_key", "AWS secret key"),
    ("sk_live_", "Stripe live secret key"),
    ("sk-", "API secret key"),
    ("ghp_", "GitHub token"),
    ("xoxb-", "Slack bot token"),
    ("postgres://", "Database URL with possible credentials"),
    ("mongodb://", "Database URL with possible credentials"),
];

/// (keywords, title, snippet)
const CODE_EXAMPLES: &[(&[&str], &str, &str)] = &[
    (
        &["cart", "checkout"],
        "Cart total with tax",
        "const total = items.reduce((sum, i) => sum + i.price * i.quantity, 0);\nconst withTax = Math.round(total * (1 + taxRate) * 100) / 100;",
    ),
    (
        &["react", "component", "ui"],
        "Typed React component",
        "type Props = { label: string; onClick: () => void };\nexport const Button = ({ label, onClick }: Props) => (\n  <button className=\"rounded px-4 py-2\" onClick={onClick}>{label}</button>\n);",
    ),
    (
        &["api", "endpoint", "route", "express"],
        "Express route with validation",
        "router.post('/api/orders', validate(orderSchema), async (req, res, next) => {\n  try {\n    res.status(201).json(await orders.create(req.body));\n  } catch (err) {\n    next(err);\n  }\n});",
    ),
    (
        &["schema", "table", "sql", "database"],
        "Orders table",
        "CREATE TABLE orders (\n  id SERIAL PRIMARY KEY,\n  customer_id INTEGER NOT NULL REFERENCES customers(id),\n  total_cents INTEGER NOT NULL,\n  created_at TIMESTAMPTZ NOT NULL DEFAULT now()\n);",
    ),
    (
        &["docker", "container", "deploy"],
        "Node service Dockerfile",
        "FROM node:20-alpine\nWORKDIR /app\nCOPY package*.json ./\nRUN npm ci --omit=dev\nCOPY . .\nCMD [\"node\", \"server.js\"]",
    ),
];

/// (keywords, practices)
const BEST_PRACTICES: &[(&[&str], &[&str])] = &[
    (
        &["payment", "checkout", "stripe"],
        &[
            "Never store raw card numbers; use the processor's tokens",
            "Confirm payment status through webhooks, not client redirects",
            "Make order creation idempotent",
        ],
    ),
    (
        &["react", "frontend", "component"],
        &[
            "Keep components small and single-purpose",
            "Lift state only as far as it is shared",
            "Test behavior, not implementation details",
        ],
    ),
    (
        &["api", "backend", "server"],
        &[
            "Validate every request body at the boundary",
            "Version the API from the first release",
            "Return consistent error shapes",
        ],
    ),
    (
        &["database", "schema", "sql"],
        &[
            "Index foreign keys and frequent filters",
            "Change schemas only through migrations",
            "Use transactions for multi-row writes",
        ],
    ),
];

/// Toolbox backed by built-in tables
#[derive(Debug, Clone, Default)]
pub struct OfflineToolbox;

impl OfflineToolbox {
    /// Create an offline toolbox
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn format_package(p: &PackageInfo) -> String {
        format!("- **{}** `{}`: {} ({})", p.name, p.version, p.description, p.area)
    }

    fn matching_packages(text: &str) -> Vec<&'static PackageInfo> {
        let lower = text.to_lowercase();
        if let Some(p) = find_package(&lower) {
            return vec![p];
        }

        let mut found: Vec<&'static PackageInfo> = Vec::new();
        for token in PACKAGE_TOKEN.find_iter(&lower) {
            if let Some(p) = find_package(token.as_str()) {
                if !found.iter().any(|f| f.name == p.name) {
                    found.push(p);
                }
            }
        }
        if found.is_empty() {
            for area in ["frontend", "backend", "database", "ecommerce", "testing", "devops"] {
                if lower.contains(area) {
                    found.extend(packages_for(area));
                }
            }
        }
        found
    }

    fn delimiters_balanced(code: &str) -> bool {
        let mut stack = Vec::new();
        for c in code.chars() {
            match c {
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    let open = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if stack.pop() != Some(open) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }
}

#[async_trait::async_trait]
impl Toolbox for OfflineToolbox {
    async fn search_code_examples(&self, query: &str) -> Result<String> {
        let lower = query.to_lowercase();
        let hits: Vec<_> = CODE_EXAMPLES
            .iter()
            .filter(|(keywords, _, _)| keywords.iter().any(|k| lower.contains(k)))
            .collect();

        if hits.is_empty() {
            return Err(Error::NotFound(format!("no code examples for '{query}'")));
        }

        debug!(count = hits.len(), "Code examples found");
        Ok(hits
            .iter()
            .map(|(_, title, snippet)| format!("**{title}**\n```\n{snippet}\n```"))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    async fn search_packages(&self, name: &str) -> Result<String> {
        let found = Self::matching_packages(name);
        if found.is_empty() {
            return Err(Error::NotFound(format!("no package matches '{name}'")));
        }
        Ok(found
            .into_iter()
            .map(Self::format_package)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn search_internet(&self, query: &str) -> Result<String> {
        let lower = query.to_lowercase();
        let practices: Vec<&str> = BEST_PRACTICES
            .iter()
            .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .flat_map(|(_, items)| items.iter().copied())
            .collect();

        if practices.is_empty() {
            return Ok(
                "- Prefer well-maintained libraries over custom code\n- Write tests alongside features\n- Document decisions where the next developer will look"
                    .to_string(),
            );
        }
        Ok(practices
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn run_tests(&self, code: &str, kind: TestKind) -> Result<String> {
        if code.trim().is_empty() {
            return Err(Error::InvalidInput("no code to test".to_string()));
        }

        let balanced = Self::delimiters_balanced(code);
        let has_tests = TEST_MARKER.is_match(code);
        let mut report = format!("{} check results:\n", kind.as_str());
        report.push_str(&format!(
            "- {} Delimiters balanced\n",
            if balanced { "✓" } else { "✗" }
        ));
        report.push_str(&format!(
            "- {} Test cases present\n",
            if has_tests { "✓" } else { "✗" }
        ));
        if kind == TestKind::Accessibility {
            let labelled = !code.contains("<img") || code.contains("alt=");
            report.push_str(&format!(
                "- {} Images have alt text\n",
                if labelled { "✓" } else { "✗" }
            ));
        }
        if !has_tests {
            report.push_str(&format!(
                "\nAdd {} tests before merging; none were found in the sample.",
                kind.as_str()
            ));
        }
        Ok(report)
    }

    async fn troubleshoot(&self, error_text: &str) -> Result<String> {
        Ok(diagnose(error_text).to_markdown())
    }

    async fn check_security(&self, code: &str) -> Result<String> {
        let hits: Vec<&str> = SECRET_MARKERS
            .iter()
            .filter(|(marker, _)| code.contains(marker))
            .map(|(_, label)| *label)
            .collect();

        if hits.is_empty() {
            return Ok("No embedded secrets detected.".to_string());
        }
        Ok(format!(
            "Possible secrets in code:\n{}",
            hits.iter()
                .map(|h| format!("- {h}"))
                .collect::<Vec<_>>()
                .join("\n")
        ))
    }
}
