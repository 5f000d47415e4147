//! Onboarding store adapters.

mod file;
mod memory;

pub use file::{FileOnboardingStore, DEFAULT_ONBOARDING_STATE_FILE};
pub use memory::InMemoryOnboardingStore;
