//! Core configuration
//!
//! Every field has a default so partial TOML sections deserialize.

use serde::{Deserialize, Serialize};

/// Default per-call generation timeout (60 seconds)
pub(crate) const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 60_000;

/// Default per-call tool timeout (30 seconds)
pub(crate) const DEFAULT_TOOL_TIMEOUT_MS: u64 = 30_000;

/// Default max coordination hops below a user turn
pub(crate) const DEFAULT_MAX_COORDINATION_DEPTH: u32 = 2;

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Timeout applied to every generation call
    #[serde(default = "default_generation_timeout_ms")]
    pub generation_timeout_ms: u64,
    /// Timeout applied to every enrichment tool call
    #[serde(default = "default_tool_timeout_ms")]
    pub tool_timeout_ms: u64,
    /// Tasks shown per category in summaries before truncation
    #[serde(default = "default_summary_preview_limit")]
    pub summary_preview_limit: usize,
    /// Entries listed in the critical path section
    #[serde(default = "default_critical_path_size")]
    pub critical_path_size: usize,
    /// Enrich plain replies with tool output
    #[serde(default = "default_true")]
    pub enable_enrichment: bool,
    /// Use the dependency-aware extractor before the basic heading parser
    #[serde(default = "default_true")]
    pub use_enhanced_extractor: bool,
    /// Max coordination hops below a user turn
    #[serde(default = "default_max_coordination_depth")]
    pub max_coordination_depth: u32,
    /// Largest requirements document accepted (bytes)
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

fn default_generation_timeout_ms() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_MS
}

fn default_tool_timeout_ms() -> u64 {
    DEFAULT_TOOL_TIMEOUT_MS
}

fn default_summary_preview_limit() -> usize {
    5
}

fn default_critical_path_size() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_max_coordination_depth() -> u32 {
    DEFAULT_MAX_COORDINATION_DEPTH
}

fn default_max_document_bytes() -> usize {
    1_000_000
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            generation_timeout_ms: default_generation_timeout_ms(),
            tool_timeout_ms: default_tool_timeout_ms(),
            summary_preview_limit: default_summary_preview_limit(),
            critical_path_size: default_critical_path_size(),
            enable_enrichment: true,
            use_enhanced_extractor: true,
            max_coordination_depth: default_max_coordination_depth(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}
