use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use wp_core::ports::NavigationPort;

/// Navigation service that only records the route history.
pub struct InMemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl InMemoryNavigator {
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial_route.into()]),
        }
    }

    /// Every route visited, starting with the initial one.
    pub async fn history(&self) -> Vec<String> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl NavigationPort for InMemoryNavigator {
    async fn current_route(&self) -> anyhow::Result<String> {
        self.history
            .lock()
            .await
            .last()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("navigation history is empty"))
    }

    async fn navigate_to(&self, route: &str) -> anyhow::Result<()> {
        debug!(route, "navigate");
        self.history.lock().await.push(route.to_string());
        Ok(())
    }
}
