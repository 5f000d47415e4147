//! Onboarding domain models
//!
//! This module defines the persisted per-user onboarding record: one
//! completion flag per tour plus one-way behavioural milestones.

mod milestone;
mod patch;
mod state;

pub use milestone::{Milestone, ParseMilestoneError};
pub use patch::OnboardingPatch;
pub use state::OnboardingState;
