//! In-memory element registry
//!
//! Stands in for the host UI: elements are registered with their viewport
//! geometry and can be moved or removed to simulate re-layout.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;
use wp_core::ports::ElementRegistryPort;
use wp_core::Rect;

#[derive(Default)]
pub struct InMemoryElementRegistry {
    elements: Mutex<HashMap<String, Rect>>,
    scroll_requests: Mutex<Vec<String>>,
}

impl InMemoryElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        Self {
            elements: Mutex::new(
                elements
                    .into_iter()
                    .map(|(selector, rect)| (selector.into(), rect))
                    .collect(),
            ),
            scroll_requests: Mutex::new(Vec::new()),
        }
    }

    /// Register or move an element.
    pub async fn set(&self, selector: impl Into<String>, rect: Rect) {
        self.elements.lock().await.insert(selector.into(), rect);
    }

    pub async fn remove(&self, selector: &str) {
        self.elements.lock().await.remove(selector);
    }

    /// Selectors passed to `scroll_into_view`, oldest first.
    pub async fn scroll_requests(&self) -> Vec<String> {
        self.scroll_requests.lock().await.clone()
    }
}

#[async_trait]
impl ElementRegistryPort for InMemoryElementRegistry {
    async fn resolve(&self, selector: &str) -> anyhow::Result<Option<Rect>> {
        let rect = self.elements.lock().await.get(selector).copied();
        trace!(selector, found = rect.is_some(), "resolve element");
        Ok(rect)
    }

    async fn scroll_into_view(&self, selector: &str) -> anyhow::Result<()> {
        self.scroll_requests.lock().await.push(selector.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_registered_and_missing_elements() {
        let registry =
            InMemoryElementRegistry::with_elements([("#a", Rect::new(1.0, 2.0, 3.0, 4.0))]);

        assert_eq!(
            registry.resolve("#a").await.unwrap(),
            Some(Rect::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(registry.resolve("#b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_moves_and_remove_hides_element() {
        let registry = InMemoryElementRegistry::new();
        registry.set("#a", Rect::new(0.0, 0.0, 1.0, 1.0)).await;
        registry.set("#a", Rect::new(5.0, 5.0, 1.0, 1.0)).await;
        assert_eq!(registry.resolve("#a").await.unwrap().unwrap().left, 5.0);

        registry.remove("#a").await;
        assert!(registry.resolve("#a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scroll_requests_are_recorded() {
        let registry = InMemoryElementRegistry::new();
        registry.scroll_into_view("#a").await.unwrap();
        registry.scroll_into_view("#b").await.unwrap();
        assert_eq!(registry.scroll_requests().await, vec!["#a", "#b"]);
    }
}
