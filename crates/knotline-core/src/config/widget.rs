//! Widget configuration
//!
//! Plain numeric knobs only; there is no dynamic configuration language.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Settings shared by the range and transfer function widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Commit slider values while dragging (true) or only on release (false)
    /// Default: true
    pub tracking: bool,

    /// Radius of a control point marker in pixels
    /// The hit area is a square of twice this size centered on the marker.
    /// Default: 10.0
    pub point_size: f32,

    /// Length of a slider handle along the groove, in pixels
    /// Default: 12.0
    pub handle_length: f32,

    /// Distance outside the widget past which a drag snaps back to its
    /// starting value. `None` disables snap-back.
    /// Default: 60.0 (native slider behaviour)
    pub maximum_drag_distance: Option<f32>,

    /// Fill used by the gradient strip when the function has no points
    /// Default: opaque black
    pub fallback_color: Rgba,

    /// Range editor defaults
    pub range: RangeConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tracking: true,
            point_size: 10.0,
            handle_length: 12.0,
            maximum_drag_distance: Some(60.0),
            fallback_color: Rgba::BLACK,
            range: RangeConfig::default(),
        }
    }
}

/// Bounds, quantization and display formatting for a range editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub minimum: f64,
    pub maximum: f64,

    /// Quantization step of the underlying integer slider
    /// Default: 1.0
    pub single_step: f64,

    /// Decimals shown in value labels
    /// Default: 2
    pub decimals: usize,

    pub prefix: String,
    pub suffix: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 99.0,
            single_step: 1.0,
            decimals: 2,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl RangeConfig {
    /// Single step, falling back to 1.0 for zero, negative or non-finite input
    pub fn validated_single_step(&self) -> f64 {
        if self.single_step.is_finite() && self.single_step > 0.0 {
            self.single_step
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: WidgetConfig = serde_yaml::from_str("point_size: 4.0\n").unwrap();
        assert_eq!(config.point_size, 4.0);
        assert!(config.tracking);
        assert_eq!(config.maximum_drag_distance, Some(60.0));
    }

    #[test]
    fn test_snap_back_can_be_disabled() {
        let config: WidgetConfig = serde_yaml::from_str("maximum_drag_distance: null\n").unwrap();
        assert_eq!(config.maximum_drag_distance, None);
    }

    #[test]
    fn test_validated_single_step() {
        let mut range = RangeConfig::default();
        range.single_step = 0.0;
        assert_eq!(range.validated_single_step(), 1.0);
        range.single_step = 0.25;
        assert_eq!(range.validated_single_step(), 0.25);
    }
}
