//! Viewport backed by a tokio broadcast channel.
//!
//! The host (or a test) pushes resize/scroll/key events through the setters;
//! every subscriber receives them.

use tokio::sync::{broadcast, watch};
use tracing::trace;
use wp_core::ports::{KeyInput, ViewportEvent, ViewportPort};
use wp_core::Size;

const EVENT_CAPACITY: usize = 64;

pub struct BroadcastViewport {
    size: watch::Sender<Size>,
    events: broadcast::Sender<ViewportEvent>,
}

impl BroadcastViewport {
    pub fn new(size: Size) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (size, _) = watch::channel(size);
        Self { size, events }
    }

    pub fn resize(&self, size: Size) {
        self.size.send_replace(size);
        self.emit(ViewportEvent::Resized { size });
    }

    pub fn scroll(&self) {
        self.emit(ViewportEvent::Scrolled);
    }

    pub fn key_down(&self, key: KeyInput) {
        self.emit(ViewportEvent::KeyDown { key });
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn emit(&self, event: ViewportEvent) {
        // No subscribers is fine: nothing is listening between steps.
        let delivered = self.events.send(event).unwrap_or(0);
        trace!(delivered, "viewport event");
    }
}

impl ViewportPort for BroadcastViewport {
    fn size(&self) -> Size {
        *self.size.borrow()
    }

    fn subscribe(&self) -> broadcast::Receiver<ViewportEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resize_updates_size_and_notifies() {
        let viewport = BroadcastViewport::new(Size::new(800.0, 600.0));
        let mut rx = viewport.subscribe();

        viewport.resize(Size::new(1024.0, 768.0));

        assert_eq!(viewport.size(), Size::new(1024.0, 768.0));
        assert_eq!(
            rx.recv().await.unwrap(),
            ViewportEvent::Resized {
                size: Size::new(1024.0, 768.0)
            }
        );
    }

    #[tokio::test]
    async fn test_subscriber_count_tracks_dropped_receivers() {
        let viewport = BroadcastViewport::new(Size::new(800.0, 600.0));
        let rx = viewport.subscribe();
        assert_eq!(viewport.subscriber_count(), 1);
        drop(rx);
        assert_eq!(viewport.subscriber_count(), 0);
    }

    #[test]
    fn test_events_without_subscribers_are_dropped() {
        let viewport = BroadcastViewport::new(Size::new(800.0, 600.0));
        viewport.scroll();
        viewport.key_down(KeyInput::Escape);
    }
}
