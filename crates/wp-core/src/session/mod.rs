//! Tour session domain module.
//!
//! This module defines the tour session state machine types.

pub mod state_machine;

pub use state_machine::{TourAction, TourEvent, TourState, TourStateMachine};
