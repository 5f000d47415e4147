//! Placement engine
//!
//! Pure computation of where a step tooltip goes relative to its target.
//!
//! # Invariants
//!
//! 1. With `Auto`, sides are tried in the fixed order bottom, top, right, left;
//!    the first with enough room wins, otherwise bottom.
//! 2. The returned `(x, y)` always lies within the viewport margin, even when
//!    the tooltip then overlaps its target.
//! 3. The arrow sits on the tooltip edge facing the target.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};
use crate::tour::StepPosition;

/// Side of the target the tooltip is placed on, or the tooltip edge the
/// arrow is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn from_position(position: StepPosition) -> Option<Side> {
        match position {
            StepPosition::Top => Some(Side::Top),
            StepPosition::Bottom => Some(Side::Bottom),
            StepPosition::Left => Some(Side::Left),
            StepPosition::Right => Some(Side::Right),
            StepPosition::Auto => None,
        }
    }
}

/// Spacing used by the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementInsets {
    /// Distance between the target edge and the tooltip.
    pub gap: f64,
    /// Minimum distance between the tooltip and the viewport edge.
    pub viewport_margin: f64,
}

impl PlacementInsets {
    pub const fn new(gap: f64, viewport_margin: f64) -> Self {
        Self {
            gap,
            viewport_margin,
        }
    }

    /// Same value for the target gap and the viewport margin.
    pub const fn uniform(padding: f64) -> Self {
        Self::new(padding, padding)
    }
}

impl Default for PlacementInsets {
    fn default() -> Self {
        Self::new(16.0, 12.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub x: f64,
    pub y: f64,
    pub chosen_side: Side,
    pub arrow_side: Side,
}

pub struct PlacementEngine;

impl PlacementEngine {
    /// Order in which sides are tried for `StepPosition::Auto`.
    pub const AUTO_PRIORITY: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

    pub fn place(
        target: Rect,
        tooltip: Size,
        viewport: Size,
        preferred: StepPosition,
        insets: PlacementInsets,
    ) -> PlacementResult {
        let chosen_side = Side::from_position(preferred)
            .unwrap_or_else(|| Self::pick_auto_side(target, tooltip, viewport, insets.gap));

        let (raw_x, raw_y) = Self::raw_origin(target, tooltip, chosen_side, insets.gap);
        let margin = insets.viewport_margin;
        let x = clamp_axis(raw_x, margin, viewport.width - tooltip.width - margin);
        let y = clamp_axis(raw_y, margin, viewport.height - tooltip.height - margin);

        PlacementResult {
            x,
            y,
            chosen_side,
            arrow_side: chosen_side.opposite(),
        }
    }

    /// Room between the target edge on `side` and the viewport edge.
    pub fn available_space(target: Rect, viewport: Size, side: Side) -> f64 {
        match side {
            Side::Bottom => viewport.height - target.bottom(),
            Side::Top => target.top,
            Side::Right => viewport.width - target.right(),
            Side::Left => target.left,
        }
    }

    fn fits(target: Rect, tooltip: Size, viewport: Size, side: Side, gap: f64) -> bool {
        let needed = match side {
            Side::Top | Side::Bottom => tooltip.height,
            Side::Left | Side::Right => tooltip.width,
        };
        Self::available_space(target, viewport, side) >= needed + gap
    }

    fn pick_auto_side(target: Rect, tooltip: Size, viewport: Size, gap: f64) -> Side {
        Self::AUTO_PRIORITY
            .into_iter()
            .find(|side| Self::fits(target, tooltip, viewport, *side, gap))
            .unwrap_or(Side::Bottom)
    }

    fn raw_origin(target: Rect, tooltip: Size, side: Side, gap: f64) -> (f64, f64) {
        let centered_x = target.center_x() - tooltip.width / 2.0;
        let centered_y = target.center_y() - tooltip.height / 2.0;
        match side {
            Side::Bottom => (centered_x, target.bottom() + gap),
            Side::Top => (centered_x, target.top - gap - tooltip.height),
            Side::Right => (target.right() + gap, centered_y),
            Side::Left => (target.left - gap - tooltip.width, centered_y),
        }
    }
}

/// Clamp into `[min, max]`; when the tooltip is larger than the viewport the
/// range is inverted and the tooltip pins to `min`.
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        min
    } else {
        value.clamp(min, max)
    }
}
