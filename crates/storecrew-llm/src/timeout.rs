//! Per-call timeout wrapper
//!
//! Generation calls have no timeout of their own; this wrapper bounds each
//! call and reports an elapsed deadline as `Error::Timeout`. No retries.

use crate::error::{Error, Result};
use crate::provider::TextGenerator;
use std::time::Duration;
use tracing::warn;

/// Wraps a generator and bounds every call with a timeout
pub struct TimeoutGenerator<G> {
    inner: G,
    timeout: Duration,
}

impl<G: TextGenerator> TimeoutGenerator<G> {
    /// Create a wrapper with the given timeout in milliseconds
    pub fn new(inner: G, timeout_ms: u64) -> Self {
        Self {
            inner,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl<G: TextGenerator> TextGenerator for TimeoutGenerator<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                warn!(generator = %self.inner.name(), timeout_ms = ms, "Generation timed out");
                Err(Error::Timeout(ms))
            }
        }
    }
}
