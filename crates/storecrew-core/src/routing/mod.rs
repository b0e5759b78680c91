//! Message routing
//!
//! Maps free text to exactly one agent category through an ordered rule
//! table. The first matching rule wins; there is no scoring.

mod classifier;

pub use classifier::{
    categorize_task, classify, determine_agent_type, match_task, routing_rules, RouteMatch, RoutingRule,
    DEFAULT_RULE,
};

#[cfg(test)]
mod tests;
