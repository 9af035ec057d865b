//! In-memory piecewise transfer function

use super::{ControlPoint, ControlPointKind, PointValue, TransferFunction, TransferFunctionEvent};
use crate::error::{CurveError, Result};
use crate::observer::{Notifier, SubscriptionId};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered control points over a fixed domain
///
/// Invariants kept by every mutator:
/// - control points are sorted by ascending `x` and lie inside the domain
/// - a non-linear point's sub-points stay within `[x, next.x]`
#[derive(Debug)]
pub struct PiecewiseFunction {
    points: Vec<ControlPoint>,
    domain: (f64, f64),
    min_value: PointValue,
    max_value: PointValue,
    source_id: u64,
    revision: u64,
    notifier: Notifier<TransferFunctionEvent>,
}

impl PiecewiseFunction {
    /// Create an empty function
    ///
    /// The domain bounds are reordered if given backwards. The domain must
    /// have a non-zero width; use [`from_points`](Self::from_points) for
    /// unchecked input.
    pub fn new(domain: (f64, f64), min_value: PointValue, max_value: PointValue) -> Self {
        debug_assert!(domain.0 != domain.1, "zero-width domain {:?}", domain);
        Self {
            points: Vec::new(),
            domain: (domain.0.min(domain.1), domain.0.max(domain.1)),
            min_value,
            max_value,
            source_id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
            revision: 0,
            notifier: Notifier::new(),
        }
    }

    /// Scalar-valued function over `domain` with values in `values`
    pub fn scalar(domain: (f64, f64), values: (f64, f64)) -> Self {
        Self::new(
            domain,
            PointValue::Scalar(values.0),
            PointValue::Scalar(values.1),
        )
    }

    /// Color-valued function; the alpha channel spans 0..1
    pub fn color(domain: (f64, f64)) -> Self {
        use crate::color::Rgba;
        Self::new(
            domain,
            PointValue::Color(Rgba::TRANSPARENT),
            PointValue::Color(Rgba::BLACK),
        )
    }

    /// Build a function from points, sorting them and validating sub-points
    pub fn from_points(
        domain: (f64, f64),
        min_value: PointValue,
        max_value: PointValue,
        points: Vec<ControlPoint>,
    ) -> Result<Self> {
        if domain.0 == domain.1 || !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(CurveError::InvalidDomain {
                min: domain.0,
                max: domain.1,
            });
        }
        let mut function = Self::new(domain, min_value, max_value);
        let mut points = points;
        for point in points.iter_mut() {
            point.x = function.clamp_to_domain(point.x);
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        function.points = points;
        function.validate()?;
        Ok(function)
    }

    /// All control points, in order
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Register for change notifications
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&TransferFunctionEvent) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Insert a control point, keeping x order
    ///
    /// The point is clamped into the domain and placed after any existing
    /// point with the same x. Returns the insertion index.
    pub fn add_control_point(&mut self, mut point: ControlPoint) -> usize {
        let x = self.clamp_to_domain(point.x);
        point.translate(x - point.x);
        let index = self.points.partition_point(|p| p.x <= point.x);
        self.points.insert(index, point);
        self.fit_sub_points(index);
        if index > 0 {
            self.fit_sub_points(index - 1);
        }
        self.changed(TransferFunctionEvent::PointAdded(index));
        index
    }

    pub fn remove_control_point(&mut self, index: usize) -> Result<ControlPoint> {
        self.check_index(index)?;
        let removed = self.points.remove(index);
        self.changed(TransferFunctionEvent::PointRemoved(index));
        Ok(removed)
    }

    pub fn set_control_point_value(&mut self, index: usize, value: PointValue) -> Result<()> {
        self.check_index(index)?;
        if self.points[index].value == value {
            return Ok(());
        }
        self.points[index].value = value;
        self.changed(TransferFunctionEvent::ValueChanged(index));
        Ok(())
    }

    /// Change the domain, clamping existing points into it
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        let (lo, hi) = (min.min(max), min.max(max));
        if !(lo < hi) || !lo.is_finite() || !hi.is_finite() {
            return Err(CurveError::InvalidDomain { min, max });
        }
        self.domain = (lo, hi);
        for index in 0..self.points.len() {
            let x = self.clamp_to_domain(self.points[index].x);
            let dx = x - self.points[index].x;
            self.points[index].translate(dx);
        }
        for index in 0..self.points.len() {
            self.fit_sub_points(index);
        }
        self.changed(TransferFunctionEvent::RangeChanged);
        Ok(())
    }

    pub fn set_value_range(&mut self, min_value: PointValue, max_value: PointValue) {
        self.min_value = min_value;
        self.max_value = max_value;
        self.changed(TransferFunctionEvent::RangeChanged);
    }

    /// Check the ordering and sub-point invariants
    pub fn validate(&self) -> Result<()> {
        for (index, point) in self.points.iter().enumerate() {
            let next_x = self.points.get(index + 1).map(|p| p.x);
            if let ControlPointKind::NonLinear { sub_points } = &point.kind {
                if sub_points.is_empty() {
                    return Err(CurveError::InvalidSubPoints {
                        x: point.x,
                        reason: "no sub-points".to_string(),
                    });
                }
                if sub_points.windows(2).any(|w| w[1].x < w[0].x) {
                    return Err(CurveError::InvalidSubPoints {
                        x: point.x,
                        reason: "sub-points are not sorted".to_string(),
                    });
                }
                let first = sub_points[0].x;
                let last = sub_points[sub_points.len() - 1].x;
                if first < point.x || next_x.is_some_and(|next| last > next) {
                    return Err(CurveError::InvalidSubPoints {
                        x: point.x,
                        reason: format!("sub-points [{first}, {last}] escape the segment"),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                count: self.points.len(),
            });
        }
        Ok(())
    }

    fn clamp_to_domain(&self, x: f64) -> f64 {
        x.clamp(self.domain.0, self.domain.1)
    }

    /// Squeeze a non-linear point's sub-points into `[x, next.x]`
    fn fit_sub_points(&mut self, index: usize) {
        let lo = self.points[index].x;
        let hi = self
            .points
            .get(index + 1)
            .map(|p| p.x)
            .unwrap_or(self.domain.1);
        if let ControlPointKind::NonLinear { sub_points } = &mut self.points[index].kind {
            for sub in sub_points.iter_mut() {
                sub.x = sub.x.clamp(lo, hi.max(lo));
            }
        }
    }

    fn changed(&mut self, event: TransferFunctionEvent) {
        self.revision += 1;
        self.notifier.notify(&event);
    }
}

impl TransferFunction for PiecewiseFunction {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn control_point(&self, index: usize) -> Option<ControlPoint> {
        self.points.get(index).cloned()
    }

    fn range(&self) -> (f64, f64) {
        self.domain
    }

    fn min_value(&self) -> PointValue {
        self.min_value
    }

    fn max_value(&self) -> PointValue {
        self.max_value
    }

    /// Clamps into the domain and between the neighbouring points so the
    /// sequence stays sorted.
    fn set_control_point_pos(&mut self, index: usize, x: f64) {
        if !x.is_finite() {
            log::warn!("set_control_point_pos: ignoring non-finite x {}", x);
            return;
        }
        let Some(point) = self.points.get(index) else {
            log::warn!("set_control_point_pos: index {} out of range", index);
            return;
        };
        let lo = if index > 0 {
            self.points[index - 1].x
        } else {
            self.domain.0
        };
        let hi = self
            .points
            .get(index + 1)
            .map(|p| p.x)
            .unwrap_or(self.domain.1);
        let x = x.clamp(self.domain.0, self.domain.1).clamp(lo, hi);
        let dx = x - point.x;
        if dx == 0.0 {
            return;
        }

        self.points[index].translate(dx);
        self.points[index].x = x;
        self.fit_sub_points(index);
        if index > 0 {
            self.fit_sub_points(index - 1);
        }
        self.changed(TransferFunctionEvent::PointMoved { index, x });
    }

    fn source_id(&self) -> u64 {
        self.source_id
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer_function::SubPoint;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ramp() -> PiecewiseFunction {
        let mut f = PiecewiseFunction::scalar((0.0, 10.0), (0.0, 1.0));
        f.add_control_point(ControlPoint::plain(0.0, 0.0));
        f.add_control_point(ControlPoint::plain(5.0, 0.5));
        f.add_control_point(ControlPoint::plain(10.0, 1.0));
        f
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut f = ramp();
        let index = f.add_control_point(ControlPoint::plain(2.5, 0.25));
        assert_eq!(index, 1);
        let xs: Vec<f64> = f.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.5, 5.0, 10.0]);
    }

    #[test]
    fn test_insert_clamps_into_domain() {
        let mut f = ramp();
        let index = f.add_control_point(ControlPoint::plain(42.0, 1.0));
        assert_eq!(index, 3);
        assert_eq!(f.points()[3].x, 10.0);
    }

    #[test]
    fn test_move_clamps_between_neighbours() {
        let mut f = ramp();
        f.set_control_point_pos(1, 12.0);
        assert_eq!(f.points()[1].x, 10.0);
        f.set_control_point_pos(1, -3.0);
        assert_eq!(f.points()[1].x, 0.0);
        assert_eq!(f.points()[1].value, PointValue::Scalar(0.5));
    }

    #[test]
    fn test_move_out_of_range_is_ignored() {
        let mut f = ramp();
        let before = f.revision();
        f.set_control_point_pos(17, 1.0);
        assert_eq!(f.revision(), before);
    }

    #[test]
    fn test_control_point_returns_copy() {
        let f = ramp();
        let mut copy = f.control_point(1).unwrap();
        copy.x = 9.0;
        assert_eq!(f.points()[1].x, 5.0);
        assert!(f.control_point(3).is_none());
    }

    #[test]
    fn test_moving_carries_sub_points() {
        let mut f = PiecewiseFunction::scalar((0.0, 10.0), (0.0, 1.0));
        f.add_control_point(ControlPoint::non_linear(
            2.0,
            0.0,
            vec![SubPoint::new(2.0, 0.0), SubPoint::new(3.0, 0.8), SubPoint::new(4.0, 1.0)],
        ));
        f.add_control_point(ControlPoint::plain(5.0, 1.0));

        f.set_control_point_pos(0, 2.5);
        let ControlPointKind::NonLinear { sub_points } = &f.points()[0].kind else {
            panic!("kind changed");
        };
        let xs: Vec<f64> = sub_points.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![2.5, 3.5, 4.5]);

        // Pulling the next point left squeezes the previous segment's samples
        f.set_control_point_pos(1, 4.0);
        let ControlPointKind::NonLinear { sub_points } = &f.points()[0].kind else {
            panic!("kind changed");
        };
        assert!(sub_points.iter().all(|s| s.x <= 4.0));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_observers_see_changes() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut f = ramp();
        let sink = events.clone();
        f.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        f.set_control_point_pos(1, 6.0);
        f.set_control_point_value(1, PointValue::Scalar(0.7)).unwrap();
        f.remove_control_point(0).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                TransferFunctionEvent::PointMoved { index: 1, x: 6.0 },
                TransferFunctionEvent::ValueChanged(1),
                TransferFunctionEvent::PointRemoved(0),
            ]
        );
    }

    #[test]
    fn test_revision_bumps() {
        let mut f = ramp();
        let before = f.revision();
        f.set_control_point_pos(1, 4.0);
        assert!(f.revision() > before);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut f = ramp();
        assert!(matches!(
            f.remove_control_point(3),
            Err(CurveError::IndexOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_from_points_rejects_empty_sub_points() {
        let result = PiecewiseFunction::from_points(
            (0.0, 1.0),
            PointValue::Scalar(0.0),
            PointValue::Scalar(1.0),
            vec![ControlPoint::non_linear(0.0, 0.0, vec![]), ControlPoint::plain(1.0, 1.0)],
        );
        assert!(matches!(result, Err(CurveError::InvalidSubPoints { .. })));
    }

    #[test]
    fn test_from_points_rejects_empty_domain() {
        let result = PiecewiseFunction::from_points(
            (1.0, 1.0),
            PointValue::Scalar(0.0),
            PointValue::Scalar(1.0),
            vec![],
        );
        assert!(matches!(result, Err(CurveError::InvalidDomain { .. })));
    }

    #[test]
    fn test_set_range_clamps_points() {
        let mut f = ramp();
        f.set_range(0.0, 4.0).unwrap();
        let xs: Vec<f64> = f.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 4.0, 4.0]);
        assert_eq!(f.range(), (0.0, 4.0));
    }

    #[test]
    fn test_non_finite_position_is_ignored() {
        let mut f = ramp();
        let before = f.revision();
        f.set_control_point_pos(1, f64::NAN);
        f.set_control_point_pos(1, f64::INFINITY);
        assert_eq!(f.points()[1].x, 5.0);
        assert_eq!(f.revision(), before);
    }

    #[test]
    fn test_non_linear_point_survives_nan_move() {
        let mut f = PiecewiseFunction::scalar((0.0, 10.0), (0.0, 1.0));
        f.add_control_point(ControlPoint::non_linear(
            0.0,
            0.0,
            vec![SubPoint::new(0.0, 0.0), SubPoint::new(4.0, 0.5)],
        ));
        f.add_control_point(ControlPoint::plain(10.0, 1.0));
        f.set_control_point_pos(0, f64::NAN);
        assert_eq!(f.points()[0].x, 0.0);
    }

    #[test]
    fn test_each_function_has_its_own_source_id() {
        let a = ramp();
        let b = ramp();
        assert_eq!(a.revision(), b.revision());
        assert_ne!(a.source_id(), b.source_id());
    }

    #[test]
    fn test_from_points_rejects_non_finite_domain() {
        let result = PiecewiseFunction::from_points(
            (0.0, f64::INFINITY),
            PointValue::Scalar(0.0),
            PointValue::Scalar(1.0),
            vec![],
        );
        assert!(matches!(result, Err(CurveError::InvalidDomain { .. })));
    }

    #[test]
    #[should_panic(expected = "zero-width domain")]
    #[cfg(debug_assertions)]
    fn test_zero_width_domain_is_a_precondition() {
        let _ = PiecewiseFunction::scalar((1.0, 1.0), (0.0, 1.0));
    }
}
