use serde::Serialize;
use wp_core::tour::{highlight_segments, TextSegment};
use wp_core::{
    PlacementEngine, PlacementResult, Rect, Size, StepPosition, StepSpec, TourId, TourSettings,
};

use super::EnhancementView;

/// Static content of the step card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub tour_id: TourId,
    pub step_index: usize,
    pub step_count: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub title: String,
    pub segments: Vec<TextSegment>,
    pub enhancements: Vec<EnhancementView>,
    pub keyboard_hint: Option<String>,
    pub position: StepPosition,
}

impl StepView {
    pub fn new(
        tour_id: TourId,
        step_index: usize,
        step_count: usize,
        step: &StepSpec,
        enhancements: Vec<EnhancementView>,
    ) -> Self {
        Self {
            tour_id,
            step_index,
            step_count,
            is_first: step_index == 0,
            is_last: step_index + 1 >= step_count,
            title: step.title.clone(),
            segments: highlight_segments(&step.content, &step.highlight_terms),
            enhancements,
            keyboard_hint: step.keyboard_hint_text.clone(),
            position: step.position,
        }
    }

    /// One-based "n of m" pair for the progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        (self.step_index + 1, self.step_count)
    }
}

/// Where the overlay is in resolving its target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// Target lookup in flight; nothing but the step card is known.
    Resolving,
    Ready {
        target: Rect,
        /// Backdrop hole: the padded target clipped to the viewport.
        cutout: Rect,
        placement: PlacementResult,
    },
    /// The target was not found after the retry.
    TargetMissing,
}

/// Everything a host needs to draw the tour overlay at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    /// Bumped on every step change; updates tagged with an older generation
    /// are dropped.
    pub generation: u64,
    pub step: Option<StepView>,
    pub status: StepStatus,
    pub tooltip_size: Size,
    pub viewport: Size,
    /// False until the content reveal delay has elapsed.
    pub content_revealed: bool,
    /// The tour is complete and the overlay is fading out.
    pub closing: bool,
}

impl OverlayFrame {
    pub fn hidden(generation: u64, viewport: Size) -> Self {
        Self {
            generation,
            step: None,
            status: StepStatus::Resolving,
            tooltip_size: Size::default(),
            viewport,
            content_revealed: false,
            closing: false,
        }
    }

    pub fn resolving(generation: u64, step: StepView, tooltip_size: Size, viewport: Size) -> Self {
        Self {
            generation,
            step: Some(step),
            status: StepStatus::Resolving,
            tooltip_size,
            viewport,
            content_revealed: false,
            closing: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.step.is_some()
    }

    pub fn placement(&self) -> Option<PlacementResult> {
        match &self.status {
            StepStatus::Ready { placement, .. } => Some(*placement),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<Rect> {
        match &self.status {
            StepStatus::Ready { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Recompute status for a freshly located target.
    pub fn place_target(&mut self, target: Option<Rect>, viewport: Size, settings: &TourSettings) {
        self.viewport = viewport;
        let Some(step) = &self.step else {
            return;
        };
        self.status = match target {
            Some(target) => StepStatus::Ready {
                target,
                cutout: target.inflate(settings.highlight_padding).clamp_to(viewport),
                placement: PlacementEngine::place(
                    target,
                    self.tooltip_size,
                    viewport,
                    step.position,
                    settings.insets(),
                ),
            },
            None => StepStatus::TargetMissing,
        };
    }

    /// Re-place with a measured tooltip size. Returns whether anything changed.
    pub fn set_tooltip_size(&mut self, size: Size, settings: &TourSettings) -> bool {
        if self.tooltip_size == size {
            return false;
        }
        self.tooltip_size = size;
        if let Some(target) = self.target() {
            self.place_target(Some(target), self.viewport, settings);
        }
        true
    }
}
