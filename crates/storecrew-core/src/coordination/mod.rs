//! Coordination - what happens to a draft after generation
//!
//! - Dependency: explicit `COORDINATE_WITH` markers and implicit phrases
//! - Escalation: stuck-draft markers
//! - Enrichment: first-match tool enrichment
//! - Coordinator: the fixed precedence between the three

mod coordinator;
mod dependency;
mod enrichment;
mod escalation;


pub use coordinator::{consultation_placeholder, Coordinator};
pub use dependency::{detect_dependencies, detect_dependencies_for, DependencyInfo};
pub use enrichment::{
    first_code_block, select_enrichment, EnrichmentChain, EnrichmentKind, EnrichmentRule,
    ENRICHMENT_RULES,
};
pub use escalation::{is_agent_stuck, strip_escalation_prefix, ESCALATE_PREFIX, STUCK_MARKERS};
