//! Port interfaces for the application layer
//!
//! Ports define the contract between the tour engine (use cases) and the
//! host environment. Implementations are provided by the infrastructure
//! layer or by the embedding UI.

mod element_registry;
mod navigation;
pub mod onboarding;
mod viewport;

pub use element_registry::ElementRegistryPort;
pub use navigation::NavigationPort;
pub use onboarding::OnboardingStorePort;
pub use viewport::{KeyInput, ViewportEvent, ViewportPort};
