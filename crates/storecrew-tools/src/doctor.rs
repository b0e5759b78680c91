//! Doctor - error diagnosis for troubleshooting
//!
//! Classifies an error description into a failure category and produces a
//! ranked list of likely causes with a resolution checklist.

use serde::Serialize;
use tracing::debug;

/// Categories of development failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Missing module or unresolved import
    Dependency,
    /// Type or reference error at runtime
    Runtime,
    /// Browser cross-origin rejection
    Cors,
    /// Database connection or query failure
    Database,
    /// 401/403 style rejections
    Authentication,
    /// Build or compile failure
    Build,
    /// Anything else
    Unknown,
}

impl FailureCategory {
    /// Get display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dependency => "Missing Dependency",
            Self::Runtime => "Runtime Error",
            Self::Cors => "CORS Rejection",
            Self::Database => "Database Error",
            Self::Authentication => "Authentication Failure",
            Self::Build => "Build Failure",
            Self::Unknown => "Unknown Error",
        }
    }

    /// Common causes, most likely first
    #[must_use]
    pub fn common_causes(&self) -> &'static [&'static str] {
        match self {
            Self::Dependency => &[
                "Package not installed",
                "Typo in the import path",
                "Default vs named export mismatch",
            ],
            Self::Runtime => &[
                "Value is undefined before it is loaded",
                "Async result used without awaiting",
                "Wrong property name",
            ],
            Self::Cors => &[
                "API does not send Access-Control-Allow-Origin",
                "Preflight OPTIONS request not handled",
                "Credentials sent to a wildcard origin",
            ],
            Self::Database => &[
                "Connection string or credentials wrong",
                "Database not running or unreachable",
                "Migration not applied",
            ],
            Self::Authentication => &[
                "Token expired",
                "Authorization header missing",
                "Role lacks permission for the route",
            ],
            Self::Build => &[
                "Type error in recently changed file",
                "Incompatible package versions",
                "Stale build cache",
            ],
            Self::Unknown => &["Unexpected error", "Check the full stack trace"],
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Dependency => &["cannot find module", "module not found", "unresolved import"],
            Self::Runtime => &["undefined", "typeerror", "referenceerror", "null"],
            Self::Cors => &["cors", "access-control-allow-origin", "cross-origin"],
            Self::Database => &["econnrefused", "database", "relation", "sql", "mongo"],
            Self::Authentication => &["401", "403", "unauthorized", "forbidden", "jwt"],
            Self::Build => &["compile", "build failed", "syntaxerror", "webpack", "tsc"],
            Self::Unknown => &[],
        }
    }
}

/// Checked in this order; first category with a keyword hit wins
const CATEGORY_ORDER: &[FailureCategory] = &[
    FailureCategory::Cors,
    FailureCategory::Dependency,
    FailureCategory::Authentication,
    FailureCategory::Database,
    FailureCategory::Build,
    FailureCategory::Runtime,
];

/// Diagnosis for an error description
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    /// Detected category
    pub category: FailureCategory,
    /// Likely causes, most likely first
    pub causes: Vec<&'static str>,
    /// Resolution checklist
    pub checklist: Vec<String>,
}

impl Diagnosis {
    /// Render as markdown
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("### Diagnosis: {}\n\n", self.category.display_name());
        out.push_str("Likely causes:\n");
        for (i, cause) in self.causes.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, cause));
        }
        out.push_str("\nChecklist:\n");
        for step in &self.checklist {
            out.push_str(&format!("- [ ] {}\n", step));
        }
        out
    }
}

/// Diagnose an error description
#[must_use]
pub fn diagnose(error_text: &str) -> Diagnosis {
    let lower = error_text.to_lowercase();
    let category = CATEGORY_ORDER
        .iter()
        .copied()
        .find(|c| c.keywords().iter().any(|k| lower.contains(k)))
        .unwrap_or(FailureCategory::Unknown);

    debug!(category = ?category, "Diagnosed error text");

    let causes = category.common_causes().to_vec();
    let checklist = causes
        .iter()
        .map(|cause| format!("Rule out: {}", cause.to_lowercase()))
        .chain(std::iter::once("Reproduce with the smallest failing input".to_string()))
        .collect();

    Diagnosis {
        category,
        causes,
        checklist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_beats_runtime() {
        let d = diagnose("TypeError: blocked by CORS policy: No Access-Control-Allow-Origin");
        assert_eq!(d.category, FailureCategory::Cors);
    }

    #[test]
    fn test_module_not_found() {
        let d = diagnose("Error: Cannot find module 'express'");
        assert_eq!(d.category, FailureCategory::Dependency);
        assert_eq!(d.causes[0], "Package not installed");
    }

    #[test]
    fn test_unknown() {
        let d = diagnose("something odd happened");
        assert_eq!(d.category, FailureCategory::Unknown);
        assert!(d.to_markdown().contains("Unknown Error"));
    }

    #[test]
    fn test_checklist_ends_with_repro_step() {
        let d = diagnose("401 Unauthorized");
        assert_eq!(d.category, FailureCategory::Authentication);
        assert_eq!(
            d.checklist.last().map(String::as_str),
            Some("Reproduce with the smallest failing input")
        );
    }
}
