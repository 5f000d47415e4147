//! # Dependency Injection
//!
//! The only place that depends on wp-infra and wp-app at the same time.
//! Builds concrete adapters and groups them into [`TourDeps`]; no decisions
//! are made here.

use std::sync::Arc;

use tracing::debug;
use wp_app::presentation::EnhancementSupervisor;
use wp_app::TourDeps;
use wp_core::tour::CatalogError;
use wp_core::{Rect, Size, TourCatalog};
use wp_infra::{
    BroadcastViewport, FileOnboardingStore, InMemoryElementRegistry, InMemoryNavigator,
};

use super::config::AppConfig;

const ASSET_BASE: &str = "/assets/tour";

pub type WiringResult<T> = Result<T, WiringError>;

/// Dependency wiring errors
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Tour catalog is invalid: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Onboarding storage initialization failed: {0}")]
    StorageInit(String),
}

/// Host-side description of the screen the CLI simulates.
#[derive(Debug, Clone)]
pub struct HostScreen {
    pub route: String,
    pub viewport: Size,
    pub elements: Vec<(String, Rect)>,
}

/// Wired dependencies plus handles on the simulated host adapters.
pub struct WiredApp {
    pub deps: TourDeps,
    pub registry: Arc<InMemoryElementRegistry>,
    pub navigator: Arc<InMemoryNavigator>,
    pub viewport: Arc<BroadcastViewport>,
}

pub fn build_catalog() -> WiringResult<Arc<TourCatalog>> {
    Ok(Arc::new(TourCatalog::builtin()?))
}

pub fn build_onboarding_store(config: &AppConfig) -> WiringResult<Arc<FileOnboardingStore>> {
    let path = config
        .storage
        .state_file_path()
        .map_err(|e| WiringError::StorageInit(e.to_string()))?;
    debug!(path = %path.display(), "onboarding state file");
    Ok(Arc::new(FileOnboardingStore::new(path)))
}

pub fn wire_dependencies(config: &AppConfig, screen: HostScreen) -> WiringResult<WiredApp> {
    let catalog = build_catalog()?;
    let onboarding_store = build_onboarding_store(config)?;

    let registry = Arc::new(InMemoryElementRegistry::with_elements(screen.elements));
    let navigator = Arc::new(InMemoryNavigator::new(screen.route));
    let viewport = Arc::new(BroadcastViewport::new(screen.viewport));

    let deps = TourDeps {
        catalog,
        settings: config.tour.clone(),
        onboarding_store,
        element_registry: registry.clone(),
        navigation: navigator.clone(),
        viewport: viewport.clone(),
        enhancements: EnhancementSupervisor::standard(ASSET_BASE),
    };

    Ok(WiredApp {
        deps,
        registry,
        navigator,
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::config::StorageConfig;
    use wp_core::ports::ViewportPort;

    #[test]
    fn test_wire_dependencies_uses_configured_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            storage: StorageConfig {
                state_file: Some(dir.path().join("state.json")),
            },
            ..AppConfig::default()
        };
        let screen = HostScreen {
            route: "/dashboard".to_string(),
            viewport: Size::new(1024.0, 768.0),
            elements: vec![("#a".to_string(), Rect::new(0.0, 0.0, 10.0, 10.0))],
        };

        let wired = wire_dependencies(&config, screen).unwrap();

        assert_eq!(wired.viewport.size(), Size::new(1024.0, 768.0));
        assert_eq!(wired.deps.catalog.len(), wp_core::TourId::ALL.len());
        assert_eq!(
            build_onboarding_store(&config).unwrap().path(),
            dir.path().join("state.json")
        );
    }
}
