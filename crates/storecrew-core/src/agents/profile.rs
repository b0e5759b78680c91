//! Agent profiles
//!
//! One immutable profile per category, built once on first use and shared by
//! reference. Each profile carries its own `can_handle` vocabulary, which is
//! narrower than the global router and independent of routing priority.

use super::category::AgentCategory;
use regex::Regex;
use std::sync::LazyLock;

/// Static description of an agent role
#[derive(Debug, Clone)]
pub struct AgentProfile {
    /// Category this profile describes
    pub category: AgentCategory,
    /// Display name
    pub name: &'static str,
    /// Job title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Areas of expertise, most important first
    pub expertise: &'static [&'static str],
    handles: Regex,
}

impl AgentProfile {
    fn new(
        category: AgentCategory,
        name: &'static str,
        title: &'static str,
        description: &'static str,
        expertise: &'static [&'static str],
        vocabulary: &str,
    ) -> Self {
        Self {
            category,
            name,
            title,
            description,
            expertise,
            handles: Regex::new(&format!(r"(?i)\b({vocabulary})\b"))
                .expect("profile vocabulary is a compile-time constant"),
        }
    }

    /// Whether the message falls within this agent's vocabulary
    #[must_use]
    pub fn can_handle(&self, message: &str) -> bool {
        self.handles.is_match(message)
    }
}

/// Registry of all agent profiles
#[derive(Debug)]
pub struct AgentRegistry {
    profiles: Vec<AgentProfile>,
}

static REGISTRY: LazyLock<AgentRegistry> = LazyLock::new(AgentRegistry::build);

impl AgentRegistry {
    fn build() -> Self {
        let profiles = vec![
            AgentProfile::new(
                AgentCategory::Manager,
                "Development Manager",
                "Technical Project Lead",
                "Plans the project, coordinates specialists and resolves escalations",
                &[
                    "Project planning",
                    "Task breakdown and assignment",
                    "Cross-team coordination",
                    "Architecture review",
                    "Security and compliance review",
                ],
                r"phases?|tasks?|timelines?|milestones?|roadmap|plan\w*|coordinat\w*|priorit\w*|requirements?",
            ),
            AgentProfile::new(
                AgentCategory::Frontend,
                "Frontend Developer",
                "UI Engineer",
                "Builds responsive, accessible interfaces",
                &[
                    "React components",
                    "Tailwind CSS",
                    "Responsive layouts",
                    "Client-side state management",
                ],
                r"ui|components?|react|css|tailwind|responsive|layouts?|frontend|front-end|pages?|forms?",
            ),
            AgentProfile::new(
                AgentCategory::Backend,
                "Backend Developer",
                "API and Services Engineer",
                "Designs APIs, services and authentication",
                &[
                    "REST API design",
                    "Node.js and Express",
                    "Authentication and authorization",
                    "Middleware and validation",
                ],
                r"server\w*|api|apis|endpoints?|routes?|controllers?|middleware|auth\w*|backend|back-end|webhooks?",
            ),
            AgentProfile::new(
                AgentCategory::Database,
                "Database Architect",
                "Data Modeling Specialist",
                "Designs schemas, queries and migrations",
                &[
                    "Relational schema design",
                    "Query optimization",
                    "Migrations",
                    "PostgreSQL and MongoDB",
                ],
                r"schemas?|tables?|query|queries|sql|nosql|mysql|postgres\w*|mongo\w*|migrations?|database|indexes|indices",
            ),
            AgentProfile::new(
                AgentCategory::DevOps,
                "DevOps Engineer",
                "Infrastructure and Delivery Specialist",
                "Owns repositories, pipelines and deployments",
                &[
                    "GitHub workflows",
                    "CI/CD pipelines",
                    "Docker and Kubernetes",
                    "Infrastructure as code",
                ],
                r"github|repo|repository|branch(es)?|commits?|pr|pull requests?|ci/cd|pipelines?|docker\w*|kubernetes|k8s|infrastructure|deploy\w*",
            ),
            AgentProfile::new(
                AgentCategory::Ux,
                "UX Designer",
                "User Experience Specialist",
                "Shapes user flows, usability and accessibility",
                &[
                    "User flows",
                    "Wireframes",
                    "Accessibility (WCAG)",
                    "Usability testing",
                ],
                r"usability|accessibility|a11y|wireframes?|user flows?|user experience|ux|personas?",
            ),
            AgentProfile::new(
                AgentCategory::Ecommerce,
                "E-commerce Specialist",
                "Commerce Platform Expert",
                "Designs catalogs, carts, checkout and payments",
                &[
                    "Product catalogs",
                    "Cart and checkout flows",
                    "Payment integration",
                    "Pricing, tax and shipping rules",
                ],
                r"carts?|checkouts?|payments?|products?|orders?|catalogs?|catalogues?|shop\w*|stores?|storefront|customers?|inventory|pricing|prices?|discounts?|coupons?|shipping|tax(es)?|wishlists?|e-?commerce",
            ),
        ];

        Self { profiles }
    }

    /// Shared registry instance
    #[must_use]
    pub fn global() -> &'static AgentRegistry {
        &REGISTRY
    }

    /// Profile for a category
    #[must_use]
    pub fn profile(&self, category: AgentCategory) -> &AgentProfile {
        // Every category is registered in `build`, in `AgentCategory::ALL` order.
        &self.profiles[category as usize]
    }

    /// All profiles, Manager first
    #[must_use]
    pub fn profiles(&self) -> &[AgentProfile] {
        &self.profiles
    }

    /// Specialists whose vocabulary covers the message, in category order
    #[must_use]
    pub fn capable_of(&self, message: &str) -> Vec<AgentCategory> {
        self.profiles
            .iter()
            .filter(|p| p.category.is_specialist() && p.can_handle(message))
            .map(|p| p.category)
            .collect()
    }
}

/// Profile for a category from the shared registry
#[must_use]
pub fn profile_of(category: AgentCategory) -> &'static AgentProfile {
    AgentRegistry::global().profile(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_exactly_one_profile() {
        let registry = AgentRegistry::global();
        assert_eq!(registry.profiles().len(), AgentCategory::ALL.len());
        for category in AgentCategory::ALL {
            assert_eq!(registry.profile(category).category, category);
            assert_eq!(
                registry
                    .profiles()
                    .iter()
                    .filter(|p| p.category == category)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_can_handle_is_per_vocabulary() {
        assert!(profile_of(AgentCategory::Database).can_handle("Add a migration for the users table"));
        assert!(!profile_of(AgentCategory::Database).can_handle("Center the hero banner"));
        assert!(profile_of(AgentCategory::Ux).can_handle("Review the ACCESSIBILITY of the form"));
        assert!(profile_of(AgentCategory::DevOps).can_handle("open a PR for this"));
        assert!(!profile_of(AgentCategory::DevOps).can_handle("improve the product"));
    }

    #[test]
    fn test_capable_of_lists_all_matching_specialists() {
        let capable = AgentRegistry::global().capable_of("react checkout page backed by an api");
        assert_eq!(
            capable,
            vec![AgentCategory::Frontend, AgentCategory::Backend, AgentCategory::Ecommerce]
        );
    }

    #[test]
    fn test_profiles_have_expertise() {
        for profile in AgentRegistry::global().profiles() {
            assert!(!profile.expertise.is_empty(), "{} has no expertise", profile.name);
        }
    }
}
