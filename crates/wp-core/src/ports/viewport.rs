use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::geometry::Size;

/// Keys the tour reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyInput {
    ArrowRight,
    ArrowLeft,
    Enter,
    Escape,
    Other(String),
}

impl KeyInput {
    /// Map a DOM-style key name.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowRight" => KeyInput::ArrowRight,
            "ArrowLeft" => KeyInput::ArrowLeft,
            "Enter" => KeyInput::Enter,
            "Escape" | "Esc" => KeyInput::Escape,
            other => KeyInput::Other(other.to_string()),
        }
    }
}

/// Host events that can invalidate the current placement or drive the tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportEvent {
    Resized { size: Size },
    Scrolled,
    KeyDown { key: KeyInput },
}

/// Viewport size and global resize/scroll/key-down stream.
pub trait ViewportPort: Send + Sync {
    fn size(&self) -> Size;

    /// Subscribe to viewport events. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<ViewportEvent>;
}
