//! Tour domain models
//!
//! A tour is a named, ordered, non-empty sequence of steps. Each step is a
//! call-out anchored to a live UI element located through a logical selector.

mod builtin;
mod catalog;
mod highlight;
mod step;
mod tour_id;

pub use catalog::{CatalogError, TourCatalog, TourDefinition};
pub use highlight::{highlight_segments, TextSegment};
pub use step::{ShowcaseKind, StepPosition, StepSpec};
pub use tour_id::{ParseTourIdError, TourId};
