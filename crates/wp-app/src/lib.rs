//! Waypoint Application Orchestration Layer
//!
//! This crate contains the tour use cases and the runtime orchestration that
//! ties the pure tour state machine to the host ports.

pub mod deps;
pub mod presentation;
pub mod usecases;

pub use deps::TourDeps;
pub use usecases::tour::{TourController, TourError, TourHelp};
