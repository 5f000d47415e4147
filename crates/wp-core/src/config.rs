//! Tour engine settings domain model

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::placement::PlacementInsets;
use crate::tour::StepSpec;

/// What the controller does when a step target cannot be found after the
/// single retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTargetPolicy {
    /// Publish a `TargetMissing` frame and wait for an explicit retry.
    #[default]
    Surface,
    /// Advance past the step as if the user pressed next.
    Skip,
}

/// Tour engine settings
///
/// Every field has a default so partial configuration files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    /// Distance between the target and the tooltip.
    pub gap: f64,
    /// Minimum distance between the tooltip and the viewport edge.
    pub viewport_margin: f64,
    /// Extra room around the target in the backdrop cut-out.
    pub highlight_padding: f64,
    pub tooltip_width: f64,
    pub tooltip_base_height: f64,
    /// Added to the tooltip height when a step carries media.
    pub media_height: f64,
    /// Added to the tooltip height when a step carries a pro tip.
    pub pro_tip_height: f64,
    pub target_retry_delay_ms: u64,
    pub content_reveal_delay_ms: u64,
    pub completion_delay_ms: u64,
    pub navigation_settle_delay_ms: u64,
    pub missing_target: MissingTargetPolicy,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            gap: 16.0,
            viewport_margin: 12.0,
            highlight_padding: 8.0,
            tooltip_width: 380.0,
            tooltip_base_height: 180.0,
            media_height: 140.0,
            pro_tip_height: 64.0,
            target_retry_delay_ms: 50,
            content_reveal_delay_ms: 250,
            completion_delay_ms: 1200,
            navigation_settle_delay_ms: 300,
            missing_target: MissingTargetPolicy::Surface,
        }
    }
}

impl TourSettings {
    pub fn insets(&self) -> PlacementInsets {
        PlacementInsets::new(self.gap, self.viewport_margin)
    }

    /// Tooltip size before the host reports a measured one.
    pub fn estimated_tooltip_size(&self, step: &StepSpec) -> Size {
        let mut height = self.tooltip_base_height;
        if step.media_ref.is_some() {
            height += self.media_height;
        }
        if step.pro_tip_text.is_some() {
            height += self.pro_tip_height;
        }
        Size::new(self.tooltip_width, height)
    }

    pub fn target_retry_delay(&self) -> Duration {
        Duration::from_millis(self.target_retry_delay_ms)
    }

    pub fn content_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.content_reveal_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn navigation_settle_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_height_grows_with_media_and_pro_tip() {
        let settings = TourSettings::default();
        let plain = StepSpec::new("#a", "t", "c");
        let rich = plain.clone().media("m.webp").pro_tip("tip");

        assert_eq!(settings.estimated_tooltip_size(&plain).height, 180.0);
        assert_eq!(settings.estimated_tooltip_size(&rich).height, 180.0 + 140.0 + 64.0);
        assert_eq!(settings.estimated_tooltip_size(&rich).width, 380.0);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: TourSettings =
            serde_json::from_str(r#"{"gap": 24.0, "missing_target": "skip"}"#).unwrap();
        assert_eq!(settings.gap, 24.0);
        assert_eq!(settings.viewport_margin, 12.0);
        assert_eq!(settings.missing_target, MissingTargetPolicy::Skip);
    }
}
