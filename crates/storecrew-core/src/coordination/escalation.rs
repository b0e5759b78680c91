//! Escalation detection

/// Prefix an agent puts on a reply it cannot answer
pub const ESCALATE_PREFIX: &str = "ESCALATE:";

/// Phrases that mark a draft as stuck (case-sensitive)
pub const STUCK_MARKERS: &[&str] = &[
    ESCALATE_PREFIX,
    "I'm not sure",
    "This is outside my expertise",
    "I don't have enough information",
];

/// Whether a draft signals the agent cannot answer
#[must_use]
pub fn is_agent_stuck(response: &str) -> bool {
    STUCK_MARKERS.iter().any(|marker| response.contains(marker))
}

/// Remove every escalation prefix and surrounding whitespace
#[must_use]
pub fn strip_escalation_prefix(response: &str) -> String {
    response.replace(ESCALATE_PREFIX, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuck_markers() {
        assert!(is_agent_stuck("ESCALATE: needs a payments expert"));
        assert!(is_agent_stuck("Honestly, I'm not sure which carrier to use."));
        assert!(is_agent_stuck("This is outside my expertise."));
        assert!(is_agent_stuck("I don't have enough information to size this."));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(!is_agent_stuck("escalate: lowercase does not count"));
        assert!(!is_agent_stuck("i'm not sure"));
        assert!(!is_agent_stuck("Here is the schema you asked for."));
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_escalation_prefix("ESCALATE:  Need a lawyer "), "Need a lawyer");
        assert_eq!(strip_escalation_prefix("nothing to strip"), "nothing to strip");
    }
}
