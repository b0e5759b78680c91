use crate::agents::AgentCategory;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Name reported when no rule matched
pub const DEFAULT_RULE: &str = "default";

const ECOMMERCE: &str = r"carts?|checkouts?|payments?|products?|orders?|catalogs?|catalogues?|shop\w*|stores?|storefront|customers?|inventory|pricing|prices?|discounts?|coupons?|shipping|tax(es)?|wishlists?|e-?commerce";
const DEVOPS: &str = r"github|git|repo|repos|repository|repositories|branch(es)?|commits?|pr|prs|pull requests?|ci/cd|pipelines?|docker\w*|kubernetes|k8s|infrastructure|deploy\w*";
const FRONTEND: &str = r"ui|components?|react|css|tailwind|responsive|layouts?|frontend|front-end";
const BACKEND: &str = r"server\w*|api|apis|endpoints?|routes?|routing|controllers?|middleware|auth\w*|backend|back-end";
const DATABASE: &str = r"schemas?|tables?|query|queries|sql|nosql|mysql|postgres\w*|mongo\w*|redis|sqlite|migrations?|database|databases";
const UX: &str = r"usability|accessibility|a11y|wireframes?|user flows?|user experience|ux";
const BUILD_INTENT: &str = r"build\w*|create\w*|generat\w*|implement\w*|make|develop\w*";
const BUILD_ECOMMERCE: &str = r"sell\w*|merchant|marketplace|buy\w*|purchas\w*";
const BUILD_FRONTEND: &str = r"pages?|screens?|forms?|buttons?|interfaces?|dashboards?|views?|website|landing";
const BUILD_BACKEND: &str = r"services?|logic|webhooks?|integrations?|functions?";
const BUILD_DATABASE: &str = r"data|models?|storage|records?|persist\w*";
const PROJECT: &str = r"phases?|tasks?|timelines?|milestones?|roadmap|sprints?|plan\w*";

/// One routing rule: every pattern must match
#[derive(Debug)]
pub struct RoutingRule {
    /// Rule name, reported with the route
    pub name: &'static str,
    /// Category the rule routes to
    pub category: AgentCategory,
    patterns: Vec<Regex>,
}

impl RoutingRule {
    fn new(name: &'static str, category: AgentCategory, vocabularies: &[&str]) -> Self {
        let patterns = vocabularies
            .iter()
            .map(|v| {
                Regex::new(&format!(r"(?i)\b({v})\b"))
                    .expect("routing vocabulary is a compile-time constant")
            })
            .collect();
        Self {
            name,
            category,
            patterns,
        }
    }

    /// Whether the rule matches the text
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().all(|p| p.is_match(text))
    }
}

/// Ordered rule table. Precedence: e-commerce, DevOps, frontend, backend,
/// database, UX, generic build intent (with its own sub-signals), project
/// management.
static ROUTING_RULES: LazyLock<Vec<RoutingRule>> = LazyLock::new(|| {
    vec![
        RoutingRule::new("ecommerce", AgentCategory::Ecommerce, &[ECOMMERCE]),
        RoutingRule::new("devops", AgentCategory::DevOps, &[DEVOPS]),
        RoutingRule::new("frontend", AgentCategory::Frontend, &[FRONTEND]),
        RoutingRule::new("backend", AgentCategory::Backend, &[BACKEND]),
        RoutingRule::new("database", AgentCategory::Database, &[DATABASE]),
        RoutingRule::new("ux", AgentCategory::Ux, &[UX]),
        RoutingRule::new(
            "build_ecommerce",
            AgentCategory::Ecommerce,
            &[BUILD_INTENT, BUILD_ECOMMERCE],
        ),
        RoutingRule::new(
            "build_frontend",
            AgentCategory::Frontend,
            &[BUILD_INTENT, BUILD_FRONTEND],
        ),
        RoutingRule::new(
            "build_backend",
            AgentCategory::Backend,
            &[BUILD_INTENT, BUILD_BACKEND],
        ),
        RoutingRule::new(
            "build_database",
            AgentCategory::Database,
            &[BUILD_INTENT, BUILD_DATABASE],
        ),
        RoutingRule::new("project", AgentCategory::Manager, &[PROJECT]),
    ]
});

/// The ordered routing table
#[must_use]
pub fn routing_rules() -> &'static [RoutingRule] {
    &ROUTING_RULES
}

/// Routing outcome with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch {
    /// Routed category
    pub category: AgentCategory,
    /// Name of the matching rule, or `DEFAULT_RULE`
    pub rule: &'static str,
}

fn first_match(text: &str) -> Option<&'static RoutingRule> {
    ROUTING_RULES.iter().find(|rule| rule.matches(text))
}

/// Classify a message, reporting the matching rule
#[must_use]
pub fn classify(message: &str) -> RouteMatch {
    let route = match first_match(message) {
        Some(rule) => RouteMatch {
            category: rule.category,
            rule: rule.name,
        },
        None => RouteMatch {
            category: AgentCategory::Manager,
            rule: DEFAULT_RULE,
        },
    };
    debug!(category = %route.category, rule = route.rule, "Message routed");
    route
}

/// Route a message to the agent that should handle it
#[must_use]
pub fn determine_agent_type(message: &str) -> AgentCategory {
    classify(message).category
}

/// Category of the first rule matching task text, if any rule matches
#[must_use]
pub fn match_task(text: &str) -> Option<AgentCategory> {
    first_match(text).map(|rule| rule.category)
}

/// Category for a task extracted from a requirements document.
///
/// Same rule family as routing; text with no specific signal is a
/// Manager (process) task.
#[must_use]
pub fn categorize_task(text: &str) -> AgentCategory {
    match_task(text).unwrap_or(AgentCategory::Manager)
}
