use async_trait::async_trait;

use crate::geometry::Rect;

/// Lookup of live UI elements by logical selector.
#[async_trait]
pub trait ElementRegistryPort: Send + Sync {
    /// Current viewport geometry of the element, `None` if it is not rendered.
    async fn resolve(&self, selector: &str) -> anyhow::Result<Option<Rect>>;

    /// Ask the host to scroll the element into centred view.
    async fn scroll_into_view(&self, selector: &str) -> anyhow::Result<()>;
}
