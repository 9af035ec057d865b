//! Transfer function data model
//!
//! A transfer function is an ordered sequence of control points mapping a
//! scalar domain onto either scalar values or colors (whose alpha is the
//! ordinate). Renderers only see the [`TransferFunction`] trait; the
//! in-memory implementation is [`PiecewiseFunction`].
//!
//! ## Control point kinds
//!
//! - **Plain**: straight interpolation to the next point
//! - **Bezier**: a cubic through `(self, p1, p2, next)`
//! - **NonLinear**: pre-sampled sub-points covering the segment to the next point

mod piecewise;
mod preset;

pub use piecewise::PiecewiseFunction;
pub use preset::{load_preset, save_preset, TransferFunctionPreset};

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Dependent value of a control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Scalar(f64),
    Color(Rgba),
}

impl Default for PointValue {
    fn default() -> Self {
        PointValue::Scalar(0.0)
    }
}

impl PointValue {
    /// Ordinate of the value: the scalar itself, or the color's alpha
    pub fn y(&self) -> f64 {
        match self {
            PointValue::Scalar(v) => *v,
            PointValue::Color(c) => c.a as f64,
        }
    }

    /// Color of the value, if it carries one
    pub fn color(&self) -> Option<Rgba> {
        match self {
            PointValue::Scalar(_) => None,
            PointValue::Color(c) => Some(*c),
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, PointValue::Color(_))
    }
}

impl From<f64> for PointValue {
    fn from(v: f64) -> Self {
        PointValue::Scalar(v)
    }
}

impl From<Rgba> for PointValue {
    fn from(c: Rgba) -> Self {
        PointValue::Color(c)
    }
}

/// A bare `(x, value)` pair, used for Bezier handles and non-linear samples
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubPoint {
    pub x: f64,
    pub value: PointValue,
}

impl SubPoint {
    pub fn new(x: f64, value: impl Into<PointValue>) -> Self {
        Self {
            x,
            value: value.into(),
        }
    }
}

/// Interpolation strategy for the segment starting at a control point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlPointKind {
    #[default]
    Plain,
    Bezier { p1: SubPoint, p2: SubPoint },
    NonLinear { sub_points: Vec<SubPoint> },
}

/// One knot of a transfer function
///
/// Data sources hand out owned copies; mutating a copy never affects the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub value: PointValue,
    #[serde(default)]
    pub kind: ControlPointKind,
}

impl ControlPoint {
    pub fn plain(x: f64, value: impl Into<PointValue>) -> Self {
        Self {
            x,
            value: value.into(),
            kind: ControlPointKind::Plain,
        }
    }

    pub fn bezier(x: f64, value: impl Into<PointValue>, p1: SubPoint, p2: SubPoint) -> Self {
        Self {
            x,
            value: value.into(),
            kind: ControlPointKind::Bezier { p1, p2 },
        }
    }

    pub fn non_linear(x: f64, value: impl Into<PointValue>, sub_points: Vec<SubPoint>) -> Self {
        Self {
            x,
            value: value.into(),
            kind: ControlPointKind::NonLinear { sub_points },
        }
    }

    /// The point itself as a sub-point
    pub fn point(&self) -> SubPoint {
        SubPoint {
            x: self.x,
            value: self.value,
        }
    }

    /// Cubic parameters for the segment to `end`
    ///
    /// Non-Bezier points duplicate the endpoints, which degenerates to a line.
    pub fn bezier_params(&self, end: &ControlPoint) -> [SubPoint; 4] {
        match &self.kind {
            ControlPointKind::Bezier { p1, p2 } => [self.point(), *p1, *p2, end.point()],
            _ => [self.point(), self.point(), end.point(), end.point()],
        }
    }

    /// Samples covering the segment to `end`
    ///
    /// Non-linear points return their stored sub-points; other kinds return
    /// just the two endpoints.
    pub fn segment_points(&self, end: &ControlPoint) -> Vec<SubPoint> {
        match &self.kind {
            ControlPointKind::NonLinear { sub_points } => {
                debug_assert!(!sub_points.is_empty(), "non-linear point without sub-points");
                sub_points.clone()
            }
            _ => vec![self.point(), end.point()],
        }
    }

    /// Move the point, carrying its Bezier handles or sub-points along
    pub(crate) fn translate(&mut self, dx: f64) {
        self.x += dx;
        match &mut self.kind {
            ControlPointKind::Plain => {}
            ControlPointKind::Bezier { p1, p2 } => {
                p1.x += dx;
                p2.x += dx;
            }
            ControlPointKind::NonLinear { sub_points } => {
                for sub in sub_points.iter_mut() {
                    sub.x += dx;
                }
            }
        }
    }
}

/// Change notifications emitted by a data source
#[derive(Debug, Clone, PartialEq)]
pub enum TransferFunctionEvent {
    /// A control point was inserted at this index
    PointAdded(usize),
    /// The control point at this index was removed
    PointRemoved(usize),
    /// A control point moved along the domain
    PointMoved { index: usize, x: f64 },
    /// A control point's value changed
    ValueChanged(usize),
    /// Domain or value range changed
    RangeChanged,
}

/// Data source consumed by the curve renderers
pub trait TransferFunction {
    /// Number of control points
    fn count(&self) -> usize;

    /// Owned copy of the control point at `index`
    fn control_point(&self, index: usize) -> Option<ControlPoint>;

    /// Domain `(x_min, x_max)`
    fn range(&self) -> (f64, f64);

    fn min_value(&self) -> PointValue;

    fn max_value(&self) -> PointValue;

    /// Move a control point; values are left untouched
    fn set_control_point_pos(&mut self, index: usize, x: f64);

    /// Process-unique identity of this data source
    ///
    /// Two live sources never share an id, so `(source_id, revision)`
    /// identifies one state of one source.
    fn source_id(&self) -> u64;

    /// Monotonic counter bumped on every change, used to invalidate caches
    fn revision(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_value_uses_alpha() {
        let v = PointValue::Color(Rgba::new(1.0, 0.0, 0.0, 0.25));
        assert!((v.y() - 0.25).abs() < 1e-6);
        assert_eq!(PointValue::Scalar(3.0).y(), 3.0);
        assert!(PointValue::Scalar(3.0).color().is_none());
    }

    #[test]
    fn test_bezier_params_for_plain_point() {
        let start = ControlPoint::plain(0.0, 0.0);
        let end = ControlPoint::plain(1.0, 1.0);
        let params = start.bezier_params(&end);
        assert_eq!(params[1], start.point());
        assert_eq!(params[2], end.point());
    }

    #[test]
    fn test_bezier_params_uses_handles() {
        let p1 = SubPoint::new(0.2, 0.9);
        let p2 = SubPoint::new(0.8, 0.1);
        let start = ControlPoint::bezier(0.0, 0.0, p1, p2);
        let end = ControlPoint::plain(1.0, 1.0);
        assert_eq!(start.bezier_params(&end), [start.point(), p1, p2, end.point()]);
    }

    #[test]
    fn test_copies_are_independent() {
        let original = ControlPoint::non_linear(0.0, 0.0, vec![SubPoint::new(0.0, 0.0)]);
        let mut copy = original.clone();
        copy.translate(0.5);
        assert_eq!(original.x, 0.0);
        assert_eq!(copy.x, 0.5);
    }
}
