//! Waypoint
//!
//! Guided product tours with persisted per-user onboarding progress.

pub mod bootstrap;
pub mod cli;
