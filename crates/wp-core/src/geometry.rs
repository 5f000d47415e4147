//! Viewport geometry primitives.
//!
//! All coordinates are CSS-pixel style `f64` values in viewport space: the
//! origin is the top-left corner of the visible area.

use serde::{Deserialize, Serialize};

/// Width/height pair used for tooltips and viewports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box of a live UI element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Grow the rect by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Intersect with the viewport `[0, 0, viewport.width, viewport.height]`.
    ///
    /// A rect entirely outside the viewport collapses to zero size at the
    /// nearest edge.
    pub fn clamp_to(&self, viewport: Size) -> Self {
        let left = self.left.clamp(0.0, viewport.width.max(0.0));
        let top = self.top.clamp(0.0, viewport.height.max(0.0));
        let right = self.right().clamp(left, viewport.width.max(left));
        let bottom = self.bottom().clamp(top, viewport.height.max(top));
        Self::new(left, top, right - left, bottom - top)
    }
}
