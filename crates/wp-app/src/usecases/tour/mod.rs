//! Tour runtime
//!
//! The controller drives the pure tour state machine and executes its side
//! effects: target resolution, placement, viewport subscriptions, timers and
//! onboarding writes.

mod context;
mod controller;
mod error;
mod help;
mod resolver;
mod step_watch;

pub use controller::TourController;
pub use error::TourError;
pub use help::{TourHelp, TourHelpEntry};
pub use resolver::TargetResolver;
