#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wp_app::presentation::{EnhancementSupervisor, OverlayFrame};
use wp_app::{TourController, TourDeps};
use wp_core::ports::OnboardingStorePort;
use wp_core::{
    Rect, Size, StepSpec, TourCatalog, TourDefinition, TourId, TourSettings, TourState, UserId,
};
use wp_infra::{
    BroadcastViewport, InMemoryElementRegistry, InMemoryNavigator, InMemoryOnboardingStore,
};

pub const STEPS_PER_TOUR: usize = 3;
pub const TARGET: Rect = Rect::new(100.0, 50.0, 40.0, 40.0);
pub const VIEWPORT: Size = Size::new(1280.0, 800.0);

pub fn selector(tour_id: TourId, index: usize) -> String {
    format!("#{tour_id}-{index}")
}

pub fn entry_route(tour_id: TourId) -> String {
    format!("/{tour_id}")
}

/// Every tour has three plain steps anchored at `#<tour>-<index>`.
pub fn test_catalog() -> TourCatalog {
    let definitions = TourId::ALL
        .into_iter()
        .map(|tour_id| {
            let steps = (0..STEPS_PER_TOUR)
                .map(|index| {
                    StepSpec::new(
                        selector(tour_id, index),
                        format!("Step {index}"),
                        format!("Content of step {index}"),
                    )
                })
                .collect();
            TourDefinition::new(tour_id, format!("{tour_id} tour"), entry_route(tour_id), steps)
                .unwrap()
        })
        .collect::<Vec<_>>();
    TourCatalog::from_definitions(definitions).unwrap()
}

/// Registry with every step target rendered at [`TARGET`].
pub fn full_registry() -> InMemoryElementRegistry {
    InMemoryElementRegistry::with_elements(TourId::ALL.into_iter().flat_map(|tour_id| {
        (0..STEPS_PER_TOUR).map(move |index| (selector(tour_id, index), TARGET))
    }))
}

pub fn user() -> UserId {
    UserId::from("user-1")
}

pub struct Harness {
    pub store: Arc<dyn OnboardingStorePort>,
    pub registry: Arc<InMemoryElementRegistry>,
    pub navigator: Arc<InMemoryNavigator>,
    pub viewport: Arc<BroadcastViewport>,
    pub controller: TourController,
}

pub struct HarnessBuilder {
    settings: TourSettings,
    store: Arc<dyn OnboardingStorePort>,
    registry: InMemoryElementRegistry,
    route: String,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            settings: TourSettings::default(),
            store: Arc::new(InMemoryOnboardingStore::new()),
            registry: full_registry(),
            route: "/dashboard".to_string(),
        }
    }

    pub fn settings(mut self, settings: TourSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn store(mut self, store: Arc<dyn OnboardingStorePort>) -> Self {
        self.store = store;
        self
    }

    pub fn registry(mut self, registry: InMemoryElementRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn route(mut self, route: &str) -> Self {
        self.route = route.to_string();
        self
    }

    pub async fn login(self) -> Harness {
        init_tracing();
        let registry = Arc::new(self.registry);
        let navigator = Arc::new(InMemoryNavigator::new(self.route));
        let viewport = Arc::new(BroadcastViewport::new(VIEWPORT));

        let controller = TourController::login(
            user(),
            TourDeps {
                catalog: Arc::new(test_catalog()),
                settings: self.settings,
                onboarding_store: self.store.clone(),
                element_registry: registry.clone(),
                navigation: navigator.clone(),
                viewport: viewport.clone(),
                enhancements: EnhancementSupervisor::standard("/assets"),
            },
        )
        .await;

        Harness {
            store: self.store,
            registry,
            navigator,
            viewport,
            controller,
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn wait_for_state(controller: &TourController, expected: TourState) {
    let mut states = controller.subscribe_state();
    tokio::time::timeout(Duration::from_secs(5), states.wait_for(|state| *state == expected))
        .await
        .expect("timed out waiting for tour state")
        .expect("state channel closed");
}

pub async fn wait_for_frame<F>(controller: &TourController, predicate: F) -> OverlayFrame
where
    F: Fn(&OverlayFrame) -> bool,
{
    let mut frames = controller.subscribe_frames();
    let frame = tokio::time::timeout(Duration::from_secs(5), frames.wait_for(|f| predicate(f)))
        .await
        .expect("timed out waiting for overlay frame")
        .expect("frame channel closed");
    frame.clone()
}

pub fn active(tour_id: TourId, step_index: usize) -> TourState {
    TourState::Active {
        tour_id,
        step_index,
    }
}

/// The frame shows `step_index` with a located target.
pub fn step_ready(frame: &OverlayFrame, step_index: usize) -> bool {
    frame.step.as_ref().map(|step| step.step_index) == Some(step_index)
        && frame.target().is_some()
}

/// Poll a condition driven by background tasks.
pub async fn eventually<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
