//! Text generator trait definition
//!
//! Every agent obtains its draft replies through this trait. Implementations
//! may call a real model, return canned text, or replay scripted responses.

use crate::error::Result;
use std::sync::Arc;

/// Trait for free-text completion backends
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the generator name
    fn name(&self) -> &str;

    /// Complete a prompt into free text
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Shared generator handle
pub type SharedGenerator = Arc<dyn TextGenerator>;

#[async_trait::async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}
