//! Compliance checks against a named standard
//!
//! Each requirement pairs a pattern that shows the control exists with an
//! optional pattern that shows it is violated.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Supported standards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStandard {
    /// OWASP Top 10 style controls
    Owasp,
    /// GDPR data-protection controls
    Gdpr,
}

impl ComplianceStandard {
    /// All standards
    pub const ALL: [ComplianceStandard; 2] = [Self::Owasp, Self::Gdpr];

    /// Parse a standard name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "owasp" => Some(Self::Owasp),
            "gdpr" => Some(Self::Gdpr),
            _ => None,
        }
    }

    /// Standards named anywhere in free text
    pub fn mentioned_in(text: &str) -> Vec<Self> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|s| lower.contains(s.as_str()))
            .collect()
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owasp => "owasp",
            Self::Gdpr => "gdpr",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Owasp => "OWASP",
            Self::Gdpr => "GDPR",
        }
    }

    /// Requirements for this standard
    pub fn requirements(&self) -> &'static [ComplianceRequirement] {
        match self {
            Self::Owasp => OWASP_REQUIREMENTS,
            Self::Gdpr => GDPR_REQUIREMENTS,
        }
    }
}

impl std::fmt::Display for ComplianceStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One requirement of a standard
#[derive(Debug, Clone, Copy)]
pub struct ComplianceRequirement {
    /// Stable id
    pub id: &'static str,
    /// Human title
    pub title: &'static str,
    /// Evidence that the control is present
    pub required: &'static str,
    /// Evidence that the control is violated
    pub violation: Option<&'static str>,
}

const OWASP_REQUIREMENTS: &[ComplianceRequirement] = &[
    ComplianceRequirement {
        id: "input_validation",
        title: "Input validation",
        required: r"(?i)(validat|sanitiz|schema\.parse|\bjoi\b|\bzod\b)",
        violation: None,
    },
    ComplianceRequirement {
        id: "authentication",
        title: "Authentication",
        required: r"(?i)(authenticat|\bjwt\b|passport|\blogin\b|session)",
        violation: None,
    },
    ComplianceRequirement {
        id: "access_control",
        title: "Access control",
        required: r"(?i)(authori[sz]|permission|\brole|is_?admin)",
        violation: None,
    },
    ComplianceRequirement {
        id: "security_logging",
        title: "Security logging",
        required: r"(?i)(\blogger\b|\blog\.|tracing|audit)",
        violation: None,
    },
    ComplianceRequirement {
        id: "cryptographic_storage",
        title: "Cryptographic storage",
        required: r"(?i)(bcrypt|argon2|scrypt|encrypt)",
        violation: Some(r"(?i)\b(md5|sha1)\b"),
    },
    ComplianceRequirement {
        id: "dependency_hygiene",
        title: "Dependency hygiene",
        required: r"(?i)(npm audit|cargo audit|dependabot|package-lock|lockfile)",
        violation: None,
    },
];

const GDPR_REQUIREMENTS: &[ComplianceRequirement] = &[
    ComplianceRequirement {
        id: "consent",
        title: "Consent capture",
        required: r"(?i)consent",
        violation: None,
    },
    ComplianceRequirement {
        id: "data_deletion",
        title: "Data deletion",
        required: r"(?i)(delete_?(user|account)|erase|forget)",
        violation: None,
    },
    ComplianceRequirement {
        id: "data_export",
        title: "Data export",
        required: r"(?i)(export_?(user|data)|portab|download_?data)",
        violation: None,
    },
    ComplianceRequirement {
        id: "encryption_at_rest",
        title: "Encryption at rest",
        required: r"(?i)(encrypt|\bkms\b|\baes)",
        violation: Some(r"(?i)plain_?text"),
    },
    ComplianceRequirement {
        id: "privacy_policy",
        title: "Privacy policy",
        required: r"(?i)privacy",
        violation: None,
    },
    ComplianceRequirement {
        id: "retention",
        title: "Data retention",
        required: r"(?i)(retention|\bttl\b|expire|purge)",
        violation: None,
    },
];

static PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    ComplianceStandard::ALL
        .iter()
        .flat_map(|s| s.requirements())
        .flat_map(|r| std::iter::once(r.required).chain(r.violation))
        .map(|p| {
            (
                p,
                Regex::new(p).expect("compliance pattern is a compile-time constant"),
            )
        })
        .collect()
});

fn matches(pattern: &str, code: &str) -> bool {
    PATTERNS.get(pattern).is_some_and(|re| re.is_match(code))
}

/// Verdict for one requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Control found
    Passed,
    /// No evidence either way
    Warning,
    /// Violation found
    Failed,
}

impl Verdict {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }
}

/// Verdict for one requirement, with its identity
#[derive(Debug, Clone, Serialize)]
pub struct RequirementResult {
    /// Requirement id
    pub id: &'static str,
    /// Requirement title
    pub title: &'static str,
    /// Verdict
    pub verdict: Verdict,
}

/// Compliance verdicts for one code sample
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    /// Standard checked
    pub standard: ComplianceStandard,
    /// Verdicts in requirement order
    pub results: Vec<RequirementResult>,
}

impl ComplianceReport {
    /// Worst verdict across all requirements
    pub fn status(&self) -> Verdict {
        let has = |v: Verdict| self.results.iter().any(|r| r.verdict == v);
        if has(Verdict::Failed) {
            Verdict::Failed
        } else if has(Verdict::Warning) {
            Verdict::Warning
        } else {
            Verdict::Passed
        }
    }

    /// Render as markdown
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} Compliance: {}\n\n",
            self.standard.display_name(),
            self.status().as_str()
        );
        for result in &self.results {
            out.push_str(&format!("- {}: {}\n", result.title, result.verdict.as_str()));
        }
        out
    }
}

/// Check a code sample against a standard
pub fn check_compliance(code: &str, standard: ComplianceStandard) -> ComplianceReport {
    let results = standard
        .requirements()
        .iter()
        .map(|req| {
            let verdict = if req.violation.is_some_and(|v| matches(v, code)) {
                Verdict::Failed
            } else if matches(req.required, code) {
                Verdict::Passed
            } else {
                Verdict::Warning
            };
            RequirementResult {
                id: req.id,
                title: req.title,
                verdict,
            }
        })
        .collect();
    ComplianceReport { standard, results }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(report: &ComplianceReport, id: &str) -> Verdict {
        report
            .results
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.verdict)
            .unwrap()
    }

    #[test]
    fn test_parse_standard() {
        assert_eq!(ComplianceStandard::parse("OWASP"), Some(ComplianceStandard::Owasp));
        assert_eq!(ComplianceStandard::parse(" gdpr "), Some(ComplianceStandard::Gdpr));
        assert_eq!(ComplianceStandard::parse("hipaa"), None);
        assert_eq!(
            ComplianceStandard::mentioned_in("audit this for GDPR please"),
            vec![ComplianceStandard::Gdpr]
        );
    }

    #[test]
    fn test_violation_beats_evidence() {
        let code = "const hash = bcrypt.hash(pw);\nconst legacy = md5(pw);";
        let report = check_compliance(code, ComplianceStandard::Owasp);

        assert_eq!(verdict(&report, "cryptographic_storage"), Verdict::Failed);
        assert_eq!(report.status(), Verdict::Failed);
    }

    #[test]
    fn test_owasp_passes_with_all_evidence() {
        let code = r#"
            // run npm audit in CI
            const body = schema.parse(req.body); // validation
            passport.authenticate('jwt');
            if (!user.permissions.includes('admin')) return res.sendStatus(403);
            logger.info('login attempt');
            const hash = await bcrypt.hash(body.password, 12);
        "#;
        let report = check_compliance(code, ComplianceStandard::Owasp);

        assert!(report.results.iter().all(|r| r.verdict == Verdict::Passed));
        assert_eq!(report.status(), Verdict::Passed);
    }

    #[test]
    fn test_missing_evidence_is_warning() {
        let report = check_compliance("function add(a, b) { return a + b; }", ComplianceStandard::Gdpr);

        assert_eq!(report.results.len(), 6);
        assert!(report.results.iter().all(|r| r.verdict == Verdict::Warning));
        assert_eq!(report.status(), Verdict::Warning);
        assert!(report.to_markdown().starts_with("## GDPR Compliance: warning"));
    }

    #[test]
    fn test_gdpr_mixed() {
        let code = "if (user.consent) { storePlaintext(email); }\nfunction deleteAccount(id) {}";
        let report = check_compliance(code, ComplianceStandard::Gdpr);

        assert_eq!(verdict(&report, "consent"), Verdict::Passed);
        assert_eq!(verdict(&report, "data_deletion"), Verdict::Passed);
        assert_eq!(verdict(&report, "encryption_at_rest"), Verdict::Failed);
        assert_eq!(verdict(&report, "retention"), Verdict::Warning);
    }
}
