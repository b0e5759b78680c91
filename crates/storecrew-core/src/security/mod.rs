//! Security - pattern-based code audit and compliance verdicts

mod audit;
mod compliance;

pub use audit::{
    audit_code, CodeCheck, SecurityFinding, SecurityReport, SecuritySummary, Severity, CODE_CHECKS,
};
pub use compliance::{
    check_compliance, ComplianceReport, ComplianceRequirement, ComplianceStandard,
    RequirementResult, Verdict,
};
