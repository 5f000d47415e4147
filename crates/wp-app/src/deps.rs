//! # Tour Dependencies
//!
//! This module defines the dependency grouping for controller construction.
//! It is NOT a Builder: no build steps, no default values, no hidden logic.

use std::sync::Arc;

use wp_core::ports::{ElementRegistryPort, NavigationPort, OnboardingStorePort, ViewportPort};
use wp_core::{TourCatalog, TourSettings};

use crate::presentation::EnhancementSupervisor;

/// Tour controller dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct TourDeps {
    // Domain
    pub catalog: Arc<TourCatalog>,
    pub settings: TourSettings,

    // Persistence
    pub onboarding_store: Arc<dyn OnboardingStorePort>,

    // Host UI
    pub element_registry: Arc<dyn ElementRegistryPort>,
    pub navigation: Arc<dyn NavigationPort>,
    pub viewport: Arc<dyn ViewportPort>,

    // Presentation
    pub enhancements: EnhancementSupervisor,
}
