//! Error types for storecrew-core
//!
//! Errors stay internal: everything the user sees is one of the fixed,
//! friendly strings below. Diagnostic detail only goes to the logs.

use thiserror::Error;

/// Reply returned when an agent could not produce an answer
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, I ran into a problem while working on your request. Please try again in a moment.";

/// Reply returned when a requirements document could not be processed
pub const PARSE_ERROR_MESSAGE: &str =
    "I encountered an error processing your requirements document. Please check the formatting and try again.";

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Text generation failed
    #[error("llm error: {0}")]
    Llm(#[from] storecrew_llm::Error),

    /// Enrichment tool failed
    #[error("tool error: {0}")]
    Tool(#[from] storecrew_tools::Error),

    /// Requirements document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for user-facing error messages
///
/// Messages never include the underlying error text.
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> &'static str;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> &'static str {
        match self {
            Error::Parse(_) => PARSE_ERROR_MESSAGE,
            Error::Llm(_) | Error::Tool(_) | Error::Internal(_) => APOLOGY_MESSAGE,
        }
    }
}
