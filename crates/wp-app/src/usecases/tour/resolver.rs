//! Target resolver
//!
//! Locates a step's live element through the element registry. Activation
//! looks once, and if the element is not rendered yet, once more after a
//! short fixed delay. There is no further automatic retry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use wp_core::ports::ElementRegistryPort;
use wp_core::Rect;

#[derive(Clone)]
pub struct TargetResolver {
    registry: Arc<dyn ElementRegistryPort>,
    retry_delay: Duration,
}

impl TargetResolver {
    pub fn new(registry: Arc<dyn ElementRegistryPort>, retry_delay: Duration) -> Self {
        Self {
            registry,
            retry_delay,
        }
    }

    /// Resolve on step activation: lookup, one delayed retry, then scroll the
    /// element into centred view and report its settled geometry.
    pub async fn resolve(&self, selector: &str) -> Option<Rect> {
        if self.locate(selector).await.is_none() {
            debug!(selector, delay_ms = self.retry_delay.as_millis() as u64, "target not rendered yet, retrying once");
            tokio::time::sleep(self.retry_delay).await;
            self.locate(selector).await?;
        }

        if let Err(err) = self.registry.scroll_into_view(selector).await {
            warn!(selector, error = %err, "scroll into view failed");
        }

        // Geometry changes once the host has scrolled.
        self.locate(selector).await
    }

    /// Single lookup without retry; registry errors count as not found.
    pub async fn locate(&self, selector: &str) -> Option<Rect> {
        match self.registry.resolve(selector).await {
            Ok(rect) => rect,
            Err(err) => {
                warn!(selector, error = %err, "element registry lookup failed");
                None
            }
        }
    }
}
