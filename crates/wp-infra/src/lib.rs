pub mod navigation;
pub mod onboarding_store;
pub mod registry;
pub mod viewport;

pub use navigation::InMemoryNavigator;
pub use onboarding_store::{FileOnboardingStore, InMemoryOnboardingStore};
pub use registry::InMemoryElementRegistry;
pub use viewport::BroadcastViewport;
