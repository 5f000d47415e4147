//! # wp-core
//!
//! Core domain models and business logic for Waypoint product tours.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the tour catalog, the persisted onboarding record, the placement engine and the
//! tour session state machine, plus the ports implemented by outer layers.

// Public module exports
pub mod config;
pub mod geometry;
pub mod ids;
pub mod onboarding;
pub mod placement;
pub mod ports;
pub mod session;
pub mod tour;

// Re-export commonly used types at the crate root
pub use config::{MissingTargetPolicy, TourSettings};
pub use geometry::{Rect, Size};
pub use ids::UserId;
pub use onboarding::{Milestone, OnboardingPatch, OnboardingState};
pub use placement::{PlacementEngine, PlacementInsets, PlacementResult, Side};
pub use session::{TourAction, TourEvent, TourState, TourStateMachine};
pub use tour::{StepPosition, StepSpec, TourCatalog, TourDefinition, TourId};
