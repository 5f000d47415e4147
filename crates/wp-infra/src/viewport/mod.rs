mod broadcast_viewport;

pub use broadcast_viewport::BroadcastViewport;
