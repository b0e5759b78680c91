//! Agent categories
//!
//! The closed set of roles on the team. Every routing decision, coordination
//! marker and task bucket resolves to one of these.

use serde::{Deserialize, Serialize};

/// Agent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    /// Development manager (synthesis, escalation target, project state)
    Manager,
    /// Frontend developer
    Frontend,
    /// Backend developer
    Backend,
    /// Database architect
    Database,
    /// DevOps engineer
    DevOps,
    /// UX designer
    Ux,
    /// E-commerce specialist
    Ecommerce,
}

/// Marker names accepted in `COORDINATE_WITH:<NAME>:` tags
const TAG_NAMES: &[(&str, AgentCategory)] = &[
    ("MANAGER", AgentCategory::Manager),
    ("FRONTEND", AgentCategory::Frontend),
    ("BACKEND", AgentCategory::Backend),
    ("DATABASE", AgentCategory::Database),
    ("DB", AgentCategory::Database),
    ("DEVOPS", AgentCategory::DevOps),
    ("UX", AgentCategory::Ux),
    ("ECOMMERCE", AgentCategory::Ecommerce),
    ("E-COMMERCE", AgentCategory::Ecommerce),
];

impl AgentCategory {
    /// All categories, Manager first
    pub const ALL: [AgentCategory; 7] = [
        Self::Manager,
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::DevOps,
        Self::Ux,
        Self::Ecommerce,
    ];

    /// The six specialist categories
    pub const SPECIALISTS: [AgentCategory; 6] = [
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::DevOps,
        Self::Ux,
        Self::Ecommerce,
    ];

    /// Stable lowercase id
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::DevOps => "devops",
            Self::Ux => "ux",
            Self::Ecommerce => "ecommerce",
        }
    }

    /// Resolve a coordination tag name (case-insensitive)
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_uppercase();
        TAG_NAMES
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, category)| *category)
    }

    /// Resolve a category id, falling back to Manager for anything unknown
    #[must_use]
    pub fn from_name_or_manager(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
            .or_else(|| Self::from_tag(&name))
            .unwrap_or(Self::Manager)
    }

    /// Whether this is one of the six specialists
    #[must_use]
    pub fn is_specialist(&self) -> bool {
        !matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
