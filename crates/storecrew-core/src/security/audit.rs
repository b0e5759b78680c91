//! Code security audit
//!
//! A fixed battery of presence/absence checks over a code sample. A check
//! fires when its pattern matches and its mitigation does not. This is
//! pattern matching, not static analysis.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Severity of a finding. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity
    Low,
    /// Medium severity
    Medium,
    /// High severity
    High,
    /// Critical severity
    Critical,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static definition of one check
#[derive(Debug, Clone, Copy)]
pub struct CodeCheck {
    /// Stable id
    pub id: &'static str,
    /// Human title
    pub title: &'static str,
    /// Severity of a finding
    pub severity: Severity,
    /// Pattern that indicates the problem
    pub pattern: &'static str,
    /// Pattern that indicates the problem is handled
    pub mitigation: Option<&'static str>,
    /// Fix advice
    pub recommendation: &'static str,
}

/// The check battery, in report order within a severity tier
pub const CODE_CHECKS: &[CodeCheck] = &[
    CodeCheck {
        id: "sql_injection",
        title: "Possible SQL injection",
        severity: Severity::Critical,
        pattern: r"(?i)\b(select|insert|update|delete)\b[^;\n]*\b(from|into|set|where)\b",
        mitigation: Some(r"(?i)(parameteri[sz]ed|prepared statement|placeholder|\$1\b)"),
        recommendation: "Use parameterized queries or prepared statements; never build SQL from user input.",
    },
    CodeCheck {
        id: "xss",
        title: "Unsanitized HTML output",
        severity: Severity::High,
        pattern: r"(innerHTML|dangerouslySetInnerHTML|document\.write)",
        mitigation: Some(r"(?i)(sanitiz|DOMPurify|escape)"),
        recommendation: "Sanitize HTML with a library such as DOMPurify or render text content instead.",
    },
    CodeCheck {
        id: "hardcoded_secret",
        title: "Hard-coded secret",
        severity: Severity::Critical,
        pattern: r#"(?i)\b(password|secret|api_?key|token)\s*[:=]\s*["'][^"']+["']"#,
        mitigation: Some(r"(process\.env|env::var)"),
        recommendation: "Load secrets from environment variables or a secret manager.",
    },
    CodeCheck {
        id: "eval_usage",
        title: "Dynamic code evaluation",
        severity: Severity::High,
        pattern: r"(\beval\s*\(|\bnew\s+Function\s*\()",
        mitigation: None,
        recommendation: "Remove eval and new Function; parse data with JSON.parse instead.",
    },
    CodeCheck {
        id: "insecure_transport",
        title: "Plain HTTP URL",
        severity: Severity::Medium,
        pattern: r"http://",
        mitigation: Some(r"(?i)(localhost|127\.0\.0\.1)"),
        recommendation: "Use HTTPS for every external endpoint.",
    },
    CodeCheck {
        id: "weak_hash",
        title: "Weak hash algorithm",
        severity: Severity::High,
        pattern: r"(?i)\b(md5|sha1)\b",
        mitigation: Some(r"(?i)\b(bcrypt|argon2|scrypt)\b"),
        recommendation: "Hash passwords with bcrypt, scrypt or argon2.",
    },
    CodeCheck {
        id: "missing_csrf",
        title: "State-changing form without CSRF protection",
        severity: Severity::Medium,
        pattern: r#"(?i)(<form[^>]*method\s*=\s*["']?post|\bapp\.post\s*\()"#,
        mitigation: Some(r"(?i)csrf"),
        recommendation: "Add CSRF tokens to forms and verify them on every POST handler.",
    },
    CodeCheck {
        id: "cors_wildcard",
        title: "Wildcard CORS origin",
        severity: Severity::Low,
        pattern: r#"(?i)(access-control-allow-origin\s*:\s*\*|origin\s*:\s*["']\*["'])"#,
        mitigation: None,
        recommendation: "Restrict allowed origins to the domains you serve.",
    },
];

struct CompiledCheck {
    check: &'static CodeCheck,
    pattern: Regex,
    mitigation: Option<Regex>,
}

static COMPILED_CHECKS: LazyLock<Vec<CompiledCheck>> = LazyLock::new(|| {
    CODE_CHECKS
        .iter()
        .map(|check| CompiledCheck {
            check,
            pattern: Regex::new(check.pattern).expect("check pattern is a compile-time constant"),
            mitigation: check
                .mitigation
                .map(|m| Regex::new(m).expect("mitigation pattern is a compile-time constant")),
        })
        .collect()
});

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityFinding {
    /// Check id
    pub id: &'static str,
    /// Check title
    pub title: &'static str,
    /// Severity
    pub severity: Severity,
    /// Fix advice
    pub recommendation: &'static str,
}

/// Counts per severity tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecuritySummary {
    /// All findings
    pub total: usize,
    /// Critical findings
    pub critical: usize,
    /// High findings
    pub high: usize,
    /// Medium findings
    pub medium: usize,
    /// Low findings
    pub low: usize,
}

/// Result of auditing one code sample
#[derive(Debug, Clone, Serialize)]
pub struct SecurityReport {
    /// Findings, most severe first
    pub findings: Vec<SecurityFinding>,
    /// Counts per tier
    pub summary: SecuritySummary,
}

impl SecurityReport {
    fn from_findings(mut findings: Vec<SecurityFinding>) -> Self {
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));
        let count = |s: Severity| findings.iter().filter(|f| f.severity == s).count();
        let summary = SecuritySummary {
            total: findings.len(),
            critical: count(Severity::Critical),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            low: count(Severity::Low),
        };
        Self { findings, summary }
    }

    /// Whether nothing was found
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Render as markdown
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## Security Review\n\n");
        if self.is_clean() {
            out.push_str("No issues found by the automated checks.\n");
            return out;
        }
        out.push_str(&format!(
            "Found {} issue(s): {} critical, {} high, {} medium, {} low.\n\n",
            self.summary.total,
            self.summary.critical,
            self.summary.high,
            self.summary.medium,
            self.summary.low
        ));
        for finding in &self.findings {
            out.push_str(&format!(
                "- **[{}] {}**: {}\n",
                finding.severity.as_str().to_uppercase(),
                finding.title,
                finding.recommendation
            ));
        }
        out
    }
}

/// Run every check against a code sample
pub fn audit_code(code: &str) -> SecurityReport {
    let findings = COMPILED_CHECKS
        .iter()
        .filter(|c| c.pattern.is_match(code))
        .filter(|c| !c.mitigation.as_ref().is_some_and(|m| m.is_match(code)))
        .map(|c| SecurityFinding {
            id: c.check.id,
            title: c.check.title,
            severity: c.check.severity,
            recommendation: c.check.recommendation,
        })
        .collect();
    SecurityReport::from_findings(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(report: &SecurityReport) -> Vec<&'static str> {
        report.findings.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_parameterized_query_is_not_flagged() {
        let code = "// parameterized query\nconst q = \"SELECT * FROM users WHERE id = ?\";";
        let report = audit_code(code);
        assert!(!ids(&report).contains(&"sql_injection"));
    }

    #[test]
    fn test_string_built_query_is_flagged() {
        let code = "const q = \"SELECT * FROM users WHERE id = \" + req.params.id;";
        let report = audit_code(code);
        assert_eq!(ids(&report), vec!["sql_injection"]);
        assert_eq!(report.summary.critical, 1);
    }

    #[test]
    fn test_numbered_bind_mitigates() {
        let code = "db.query('UPDATE orders SET status = $1 WHERE id = $2', [s, id])";
        assert!(audit_code(code).is_clean());
    }

    #[test]
    fn test_findings_ordered_by_severity() {
        let code = r#"
            res.setHeader("Access-Control-Allow-Origin: *");
            el.innerHTML = input;
            const apiKey = "sk_live_123";
            fetch("http://payments.example.com");
        "#;
        let report = audit_code(code);

        assert_eq!(
            ids(&report),
            vec!["hardcoded_secret", "xss", "insecure_transport", "cors_wildcard"]
        );
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.high, 1);
        assert_eq!(report.summary.low, 1);
    }

    #[test]
    fn test_mitigations() {
        assert!(audit_code("el.innerHTML = DOMPurify.sanitize(input);").is_clean());
        assert!(audit_code("fetch('http://localhost:3000/api')").is_clean());
        assert!(audit_code("// md5 was replaced by bcrypt\nbcrypt.hash(pw, 12)").is_clean());
        assert!(audit_code("const token = process.env.TOKEN || 'dev-token';").is_clean());
        assert!(audit_code("app.use(csrf());\napp.post('/cart', handler);").is_clean());
    }

    #[test]
    fn test_unmitigated_checks() {
        assert_eq!(ids(&audit_code("eval(userInput)")), vec!["eval_usage"]);
        assert_eq!(
            ids(&audit_code("app.post('/checkout', handler)")),
            vec!["missing_csrf"]
        );
        assert_eq!(
            ids(&audit_code("const digest = md5(password);")),
            vec!["weak_hash"]
        );
    }

    #[test]
    fn test_markdown() {
        let report = audit_code("eval(x)");
        let md = report.to_markdown();
        assert!(md.contains("1 issue(s): 0 critical, 1 high"));
        assert!(md.contains("**[HIGH] Dynamic code evaluation**"));

        assert!(audit_code("let x = 1;").to_markdown().contains("No issues found"));
    }
}
