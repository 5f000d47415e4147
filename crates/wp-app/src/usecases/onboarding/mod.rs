//! Onboarding use cases
//!
//! This module contains use cases for the per-user onboarding record:
//! loading (and lazily creating) it, flipping tour completion flags,
//! recording milestones, and summarising progress for the help surface.

pub mod get_summary;
pub mod load;
pub mod mark_milestone;
pub mod mark_tour_completed;
pub mod reset_tour;

pub use get_summary::GetOnboardingSummary;
pub use load::LoadOnboardingState;
pub use mark_milestone::MarkMilestone;
pub use mark_tour_completed::MarkTourCompleted;
pub use reset_tour::ResetTour;

use serde::Serialize;
use wp_core::{Milestone, TourId};

/// Data transfer object for one tour row of the onboarding summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourProgressDto {
    pub tour_id: TourId,
    pub title: String,
    pub step_count: usize,
    pub completed: bool,
}

/// Data transfer object for the onboarding summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingSummaryDto {
    pub completed_tours: usize,
    pub total_tours: usize,
    pub tours: Vec<TourProgressDto>,
    pub milestones: Vec<(Milestone, bool)>,
}
