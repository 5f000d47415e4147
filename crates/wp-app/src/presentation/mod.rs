//! Overlay presentation model
//!
//! A thin consumer of the controller: what the host renders for the active
//! step (backdrop cut-out, tooltip placement, step card content).

mod enhancement;
mod frame;

pub use enhancement::{
    EnhancementKind, EnhancementRenderer, EnhancementSupervisor, EnhancementView, MediaRenderer,
    ProTipRenderer, ShowcaseRenderer,
};
pub use frame::{OverlayFrame, StepStatus, StepView};
