//! Manager intent detection

/// What the user wants from the Manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerIntent {
    /// The message is a requirements document
    FileUpload,
    /// Questions about documentation
    KnowledgeBase,
    /// System architecture
    Architecture,
    /// Security and compliance review
    Security,
    /// Performance work
    Performance,
    /// Task and phase tracking
    TaskManagement,
    /// Anything else
    Default,
}

/// Intent predicates in priority order
static INTENT_RULES: &[(ManagerIntent, fn(&str) -> bool)] = &[
    (ManagerIntent::FileUpload, looks_like_document),
    (ManagerIntent::KnowledgeBase, asks_knowledge_base),
    (ManagerIntent::Architecture, asks_architecture),
    (ManagerIntent::Security, asks_security),
    (ManagerIntent::Performance, asks_performance),
    (ManagerIntent::TaskManagement, asks_task_management),
];

fn mentions(message: &str, words: &[&str]) -> bool {
    let lower = message.to_lowercase();
    words.iter().any(|w| lower.contains(w))
}

fn asks_knowledge_base(message: &str) -> bool {
    mentions(message, &["knowledge base", "documentation", "docs", "explain"])
}

fn asks_architecture(message: &str) -> bool {
    mentions(
        message,
        &["architecture", "design pattern", "microservice", "monolith", "scalab"],
    )
}

fn asks_security(message: &str) -> bool {
    mentions(
        message,
        &["security", "audit", "compliance", "owasp", "gdpr", "vulnerab"],
    )
}

fn asks_performance(message: &str) -> bool {
    mentions(message, &["performance", "optimi", "latency", "slow", "cache"])
}

fn asks_task_management(message: &str) -> bool {
    mentions(
        message,
        &["task", "phase", "timeline", "milestone", "progress", "assign"],
    )
}

/// A `# ` heading plus at least one other non-empty line
pub fn looks_like_document(message: &str) -> bool {
    let mut has_heading = false;
    let mut count = 0;
    for line in message.lines().map(str::trim).filter(|l| !l.is_empty()) {
        count += 1;
        has_heading |= line.starts_with("# ");
        if has_heading && count > 1 {
            return true;
        }
    }
    false
}

impl ManagerIntent {
    /// Detect the intent of a message; first match wins
    pub fn detect(message: &str) -> Self {
        INTENT_RULES
            .iter()
            .find(|(_, applies)| applies(message))
            .map_or(Self::Default, |(intent, _)| *intent)
    }

    /// Instruction placed above the user message when generating
    pub fn prompt_header(&self) -> Option<&'static str> {
        match self {
            Self::KnowledgeBase => Some("Answer from established documentation and cite the relevant concepts."),
            Self::Architecture => Some("Give an architecture recommendation: components, boundaries, data flow and trade-offs."),
            Self::Security => Some("Review the security posture and list concrete controls to add."),
            Self::Performance => Some("Identify likely bottlenecks and propose measurable optimizations."),
            Self::FileUpload | Self::TaskManagement | Self::Default => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_detection() {
        assert!(looks_like_document("# Store\n- product pages"));
        assert!(looks_like_document("Here are my requirements:\n\n# Store"));
        assert!(!looks_like_document("# Store"));
        assert!(!looks_like_document("## Only subtasks\n- item"));
        assert!(!looks_like_document("I want to upload a requirements document"));
    }

    #[test]
    fn test_intent_order() {
        assert_eq!(
            ManagerIntent::detect("# Security\n- audit the docs"),
            ManagerIntent::FileUpload
        );
        assert_eq!(
            ManagerIntent::detect("explain the architecture docs"),
            ManagerIntent::KnowledgeBase
        );
        assert_eq!(
            ManagerIntent::detect("is a monolith fast enough for our cache?"),
            ManagerIntent::Architecture
        );
        assert_eq!(
            ManagerIntent::detect("run an OWASP audit"),
            ManagerIntent::Security
        );
        assert_eq!(
            ManagerIntent::detect("the dashboard is slow"),
            ManagerIntent::Performance
        );
        assert_eq!(
            ManagerIntent::detect("show me the task list"),
            ManagerIntent::TaskManagement
        );
        assert_eq!(ManagerIntent::detect("hello"), ManagerIntent::Default);
    }
}
