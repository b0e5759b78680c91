//! Storecrew Tools - Enrichment Collaborators
//!
//! This crate provides the tools agents use to enrich their replies:
//! - Toolbox: the collaborator trait (search, package lookup, testing,
//!   troubleshooting, security check)
//! - Packages: immutable default package table
//! - Doctor: error-text diagnosis for troubleshooting
//! - Offline: deterministic toolbox that needs no network

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod doctor;
pub mod error;
pub mod offline;
pub mod packages;
pub mod toolbox;

pub use doctor::{diagnose, Diagnosis, FailureCategory};
pub use error::{Error, Result};
pub use offline::OfflineToolbox;
pub use packages::{find_package, packages_for, PackageInfo, DEFAULT_PACKAGES};
pub use toolbox::{SharedToolbox, TestKind, Toolbox};
