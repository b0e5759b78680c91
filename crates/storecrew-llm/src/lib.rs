//! Storecrew LLM - Text Generation Boundary
//!
//! This crate provides the text-generation collaborator used by every agent:
//! - Provider: the `TextGenerator` trait
//! - Mock: a scripted generator for tests
//! - Template: an offline generator that returns canned role replies
//! - Timeout: a per-call timeout wrapper

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod mock;
pub mod provider;
pub mod template;
pub mod timeout;

pub use error::{Error, Result};
pub use mock::ScriptedGenerator;
pub use provider::{SharedGenerator, TextGenerator};
pub use template::{TemplateGenerator, ROLE_LINE_PREFIX};
pub use timeout::TimeoutGenerator;
