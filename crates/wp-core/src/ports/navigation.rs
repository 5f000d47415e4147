use async_trait::async_trait;

#[async_trait]
pub trait NavigationPort: Send + Sync {
    async fn current_route(&self) -> anyhow::Result<String>;

    async fn navigate_to(&self, route: &str) -> anyhow::Result<()>;
}
