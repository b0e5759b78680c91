//! `agents` command

use storecrew_core::AgentRegistry;

/// Print every agent profile
pub fn run() {
    for profile in AgentRegistry::global().profiles() {
        println!(
            "{} [{}]\n  {}: {}",
            profile.name, profile.category, profile.title, profile.description
        );
        println!("  Expertise: {}\n", profile.expertise.join(", "));
    }
}
