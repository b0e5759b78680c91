//! `audit` command

use anyhow::{Context, Result};
use std::path::Path;
use storecrew_core::security::{audit_code, check_compliance, ComplianceStandard};

/// Print the security report for a file, plus compliance when asked
pub fn run(file: &Path, standard: Option<ComplianceStandard>) -> Result<()> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!("{}", audit_code(&code).to_markdown());
    if let Some(standard) = standard {
        println!("{}", check_compliance(&code, standard).to_markdown());
    }
    Ok(())
}
