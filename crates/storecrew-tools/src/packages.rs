//! Default package table
//!
//! Immutable catalog of packages the team recommends, keyed by name.

use serde::Serialize;

/// A recommended package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package name as published
    pub name: &'static str,
    /// Recommended version range
    pub version: &'static str,
    /// What the package is for
    pub description: &'static str,
    /// Area of the stack (frontend, backend, database, devops, testing, ecommerce)
    pub area: &'static str,
}

/// Packages known to the offline toolbox
pub const DEFAULT_PACKAGES: &[PackageInfo] = &[
    PackageInfo {
        name: "react",
        version: "^18.2.0",
        description: "Component-based UI library",
        area: "frontend",
    },
    PackageInfo {
        name: "next",
        version: "^14.0.0",
        description: "React framework with routing and server rendering",
        area: "frontend",
    },
    PackageInfo {
        name: "tailwindcss",
        version: "^3.4.0",
        description: "Utility-first CSS framework",
        area: "frontend",
    },
    PackageInfo {
        name: "express",
        version: "^4.18.2",
        description: "Minimal HTTP server framework for Node.js",
        area: "backend",
    },
    PackageInfo {
        name: "jsonwebtoken",
        version: "^9.0.2",
        description: "JSON Web Token signing and verification",
        area: "backend",
    },
    PackageInfo {
        name: "zod",
        version: "^3.22.4",
        description: "Schema declaration and input validation",
        area: "backend",
    },
    PackageInfo {
        name: "prisma",
        version: "^5.7.0",
        description: "Type-safe ORM with migrations",
        area: "database",
    },
    PackageInfo {
        name: "pg",
        version: "^8.11.3",
        description: "PostgreSQL client for Node.js",
        area: "database",
    },
    PackageInfo {
        name: "mongoose",
        version: "^8.0.3",
        description: "MongoDB object modeling",
        area: "database",
    },
    PackageInfo {
        name: "stripe",
        version: "^14.10.0",
        description: "Payment processing API client",
        area: "ecommerce",
    },
    PackageInfo {
        name: "jest",
        version: "^29.7.0",
        description: "JavaScript test runner",
        area: "testing",
    },
    PackageInfo {
        name: "@testing-library/react",
        version: "^14.1.2",
        description: "DOM testing utilities for React components",
        area: "testing",
    },
    PackageInfo {
        name: "helmet",
        version: "^7.1.0",
        description: "Security headers middleware for Express",
        area: "backend",
    },
    PackageInfo {
        name: "dotenv",
        version: "^16.3.1",
        description: "Loads environment variables from .env files",
        area: "devops",
    },
];

/// Find a package by exact name (case-insensitive)
#[must_use]
pub fn find_package(name: &str) -> Option<&'static PackageInfo> {
    let name = name.trim().to_lowercase();
    DEFAULT_PACKAGES.iter().find(|p| p.name == name)
}

/// Packages for an area of the stack, in table order
#[must_use]
pub fn packages_for(area: &str) -> Vec<&'static PackageInfo> {
    DEFAULT_PACKAGES.iter().filter(|p| p.area == area).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_package_case_insensitive() {
        let stripe = find_package("Stripe").unwrap();
        assert_eq!(stripe.area, "ecommerce");
        assert!(find_package("left-pad").is_none());
    }

    #[test]
    fn test_packages_for_area() {
        let db = packages_for("database");
        assert_eq!(db.len(), 3);
        assert_eq!(db[0].name, "prisma");
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = DEFAULT_PACKAGES.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_PACKAGES.len());
    }
}
