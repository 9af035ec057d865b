//! Floating-point range slider
//!
//! Wraps the integer [`RangeSlider`]: every `f64` is quantized to
//! `round(v / single_step)` for hit-testing and drawing, while the exact
//! values set programmatically are kept so they survive the round trip.

use super::geometry::{SliderGeometry, SliderStyle};
use super::state::{PointerPress, RangeSlider, RangeSliderEvent, SliderInput};
use iced::Point;

/// Range slider over `f64` values
#[derive(Debug, Clone)]
pub struct DoubleRangeSlider {
    slider: RangeSlider,
    minimum: f64,
    maximum: f64,
    minimum_value: f64,
    maximum_value: f64,
    single_step: f64,
}

impl Default for DoubleRangeSlider {
    fn default() -> Self {
        Self::new(0.0, 99.0, 1.0)
    }
}

impl DoubleRangeSlider {
    /// Slider over `minimum..=maximum` selecting the whole range
    ///
    /// A non-positive or non-finite `single_step` falls back to 1.0.
    pub fn new(minimum: f64, maximum: f64, single_step: f64) -> Self {
        let (minimum, maximum) = (minimum.min(maximum), minimum.max(maximum));
        let single_step = valid_step(single_step).unwrap_or(1.0);
        let slider = RangeSlider::with_range(
            to_int(minimum, single_step),
            to_int(maximum, single_step),
        );
        Self {
            slider,
            minimum,
            maximum,
            minimum_value: minimum,
            maximum_value: maximum,
            single_step,
        }
    }

    /// Underlying integer slider, for drawing
    pub fn int_slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn single_step(&self) -> f64 {
        self.single_step
    }

    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    pub fn maximum_value(&self) -> f64 {
        self.maximum_value
    }

    /// Minimum handle position; equals the value unless a drag preview is shown
    pub fn minimum_position(&self) -> f64 {
        self.position_or_value(self.slider.minimum_position(), self.minimum_value)
    }

    pub fn maximum_position(&self) -> f64 {
        self.position_or_value(self.slider.maximum_position(), self.maximum_value)
    }

    pub fn has_tracking(&self) -> bool {
        self.slider.has_tracking()
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.slider.set_tracking(tracking);
    }

    pub fn is_slider_down(&self) -> bool {
        self.slider.is_slider_down()
    }

    pub fn take_redraw(&mut self) -> bool {
        self.slider.take_redraw()
    }

    fn to_int(&self, v: f64) -> i32 {
        to_int(v, self.single_step)
    }

    fn from_int(&self, v: i32) -> f64 {
        (v as f64 * self.single_step).clamp(self.minimum, self.maximum)
    }

    fn position_or_value(&self, position: i32, value: f64) -> f64 {
        if position == self.to_int(value) {
            value
        } else {
            self.from_int(position)
        }
    }

    /// Change the bounds, re-clamping the current values
    pub fn set_range(&mut self, minimum: f64, maximum: f64) -> Vec<RangeSliderEvent<f64>> {
        let (minimum, maximum) = (minimum.min(maximum), minimum.max(maximum));
        self.minimum = minimum;
        self.maximum = maximum;
        let events = self
            .slider
            .set_range(self.to_int(minimum), self.to_int(maximum));
        let mut out = self.translate(events);
        out.extend(self.set_values(self.minimum_value, self.maximum_value));
        out
    }

    /// Change the quantization step, keeping the current values
    ///
    /// Invalid steps are ignored with a warning.
    pub fn set_single_step(&mut self, step: f64) {
        let Some(step) = valid_step(step) else {
            log::warn!("DoubleRangeSlider: ignoring invalid single step {}", step);
            return;
        };
        self.single_step = step;
        // Re-quantize; the f64 values are unchanged so nothing is reported
        let values = (
            self.to_int(self.minimum_value),
            self.to_int(self.maximum_value),
        );
        let _ = self
            .slider
            .set_range(self.to_int(self.minimum), self.to_int(self.maximum));
        let _ = self.slider.set_values(values.0, values.1);
        debug_assert_eq!(
            (self.slider.minimum_value(), self.slider.maximum_value()),
            values,
            "re-quantized values were clamped"
        );
    }

    /// Commit both values, clamped and reordered
    pub fn set_values(&mut self, lo: f64, hi: f64) -> Vec<RangeSliderEvent<f64>> {
        let minimum_value = lo.min(hi).clamp(self.minimum, self.maximum);
        let maximum_value = lo.max(hi).clamp(self.minimum, self.maximum);
        let events = self
            .slider
            .set_values(self.to_int(minimum_value), self.to_int(maximum_value));

        let mut out: Vec<_> = events
            .into_iter()
            .filter(|e| !is_value_event(e))
            .filter_map(|e| self.map_event(e))
            .collect();
        self.commit(minimum_value, maximum_value, &mut out);
        out
    }

    pub fn set_minimum_value(&mut self, value: f64) -> Vec<RangeSliderEvent<f64>> {
        self.set_values(value, value.max(self.maximum_value))
    }

    pub fn set_maximum_value(&mut self, value: f64) -> Vec<RangeSliderEvent<f64>> {
        self.set_values(value.min(self.minimum_value), value)
    }

    pub fn set_positions(&mut self, lo: f64, hi: f64) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.set_positions(self.to_int(lo), self.to_int(hi));
        self.translate(events)
    }

    pub fn set_minimum_position(&mut self, position: f64) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.set_minimum_position(self.to_int(position));
        self.translate(events)
    }

    pub fn set_maximum_position(&mut self, position: f64) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.set_maximum_position(self.to_int(position));
        self.translate(events)
    }

    pub fn press(
        &mut self,
        geometry: &impl SliderGeometry,
        press: PointerPress,
    ) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.press(geometry, press);
        self.translate(events)
    }

    pub fn drag(
        &mut self,
        geometry: &impl SliderGeometry,
        position: Point,
    ) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.drag(geometry, position);
        self.translate(events)
    }

    pub fn release(&mut self) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.release();
        self.translate(events)
    }

    pub fn handle_input(
        &mut self,
        input: &SliderInput,
        style: SliderStyle,
    ) -> Vec<RangeSliderEvent<f64>> {
        let events = self.slider.handle_input(input, style);
        self.translate(events)
    }

    /// Convert integer events, picking up values the integer slider committed
    fn translate(&mut self, events: Vec<RangeSliderEvent>) -> Vec<RangeSliderEvent<f64>> {
        let mut out = Vec::with_capacity(events.len());
        // Only the ends whose integer value moved are re-derived
        let (mut lo, mut hi) = (None, None);
        for event in events {
            match event {
                RangeSliderEvent::MinimumValueChanged(v) => lo = Some(self.from_int(v)),
                RangeSliderEvent::MaximumValueChanged(v) => hi = Some(self.from_int(v)),
                RangeSliderEvent::ValuesChanged(..) => {
                    let lo = lo.take().unwrap_or(self.minimum_value);
                    let hi = hi.take().unwrap_or(self.maximum_value);
                    self.commit(lo, hi, &mut out);
                }
                other => out.extend(self.map_event(other)),
            }
        }
        out
    }

    /// Store new `f64` values, reporting the ones that changed
    fn commit(&mut self, lo: f64, hi: f64, out: &mut Vec<RangeSliderEvent<f64>>) {
        let min_changed = lo != self.minimum_value;
        let max_changed = hi != self.maximum_value;
        self.minimum_value = lo;
        self.maximum_value = hi;
        if min_changed {
            out.push(RangeSliderEvent::MinimumValueChanged(lo));
        }
        if max_changed {
            out.push(RangeSliderEvent::MaximumValueChanged(hi));
        }
        if min_changed || max_changed {
            out.push(RangeSliderEvent::ValuesChanged(lo, hi));
        }
    }

    fn map_event(&self, event: RangeSliderEvent) -> Option<RangeSliderEvent<f64>> {
        Some(match event {
            RangeSliderEvent::MinimumPositionChanged(p) => {
                RangeSliderEvent::MinimumPositionChanged(self.from_int(p))
            }
            RangeSliderEvent::MaximumPositionChanged(p) => {
                RangeSliderEvent::MaximumPositionChanged(self.from_int(p))
            }
            RangeSliderEvent::PositionsChanged(lo, hi) => {
                RangeSliderEvent::PositionsChanged(self.from_int(lo), self.from_int(hi))
            }
            RangeSliderEvent::SliderMoved(lo, hi) => {
                RangeSliderEvent::SliderMoved(self.from_int(lo), self.from_int(hi))
            }
            RangeSliderEvent::SliderPressed(handle) => RangeSliderEvent::SliderPressed(handle),
            RangeSliderEvent::SliderReleased => RangeSliderEvent::SliderReleased,
            RangeSliderEvent::MinimumValueChanged(_)
            | RangeSliderEvent::MaximumValueChanged(_)
            | RangeSliderEvent::ValuesChanged(..) => return None,
        })
    }
}

fn is_value_event(event: &RangeSliderEvent) -> bool {
    matches!(
        event,
        RangeSliderEvent::MinimumValueChanged(_)
            | RangeSliderEvent::MaximumValueChanged(_)
            | RangeSliderEvent::ValuesChanged(..)
    )
}

fn valid_step(step: f64) -> Option<f64> {
    (step.is_finite() && step > 0.0).then_some(step)
}

/// `round(v / step)`, saturating at the `i32` bounds
fn to_int(v: f64, step: f64) -> i32 {
    (v / step).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_slider::geometry::LinearSliderGeometry;
    use crate::range_slider::Handle;
    use iced::Size;

    #[test]
    fn test_quantization_round_trip_within_half_step() {
        let mut slider = DoubleRangeSlider::new(0.0, 10.0, 0.25);
        for i in 0..=100 {
            let v = i as f64 * 0.1;
            let quantized = slider.from_int(slider.to_int(v));
            assert!((quantized - v).abs() <= 0.125 + 1e-9, "{} -> {}", v, quantized);
        }
        slider.set_values(2.4, 7.3);
        assert_eq!(slider.int_slider().minimum_value(), 10);
        assert_eq!(slider.int_slider().maximum_value(), 29);
    }

    #[test]
    fn test_exact_values_survive() {
        let mut slider = DoubleRangeSlider::new(0.0, 99.0, 1.0);
        let events = slider.set_values(10.4, 50.6);
        assert_eq!(slider.minimum_value(), 10.4);
        assert_eq!(slider.maximum_value(), 50.6);
        assert_eq!(slider.minimum_position(), 10.4);
        assert_eq!(
            events,
            vec![
                RangeSliderEvent::MinimumValueChanged(10.4),
                RangeSliderEvent::MaximumValueChanged(50.6),
                RangeSliderEvent::ValuesChanged(10.4, 50.6),
            ]
        );
    }

    #[test]
    fn test_sub_step_change_is_still_reported() {
        let mut slider = DoubleRangeSlider::new(0.0, 99.0, 1.0);
        slider.set_values(10.0, 20.0);
        let events = slider.set_values(10.2, 20.0);
        assert_eq!(slider.int_slider().minimum_value(), 10);
        assert_eq!(
            events,
            vec![
                RangeSliderEvent::MinimumValueChanged(10.2),
                RangeSliderEvent::ValuesChanged(10.2, 20.0),
            ]
        );
    }

    #[test]
    fn test_values_clamped_to_range() {
        let mut slider = DoubleRangeSlider::new(-1.0, 1.0, 0.01);
        slider.set_values(0.5, -3.0);
        assert_eq!((slider.minimum_value(), slider.maximum_value()), (-1.0, 0.5));
    }

    #[test]
    fn test_set_range_reclamps() {
        let mut slider = DoubleRangeSlider::new(0.0, 10.0, 0.5);
        slider.set_values(1.0, 9.0);
        slider.set_range(2.0, 5.0);
        assert_eq!((slider.minimum_value(), slider.maximum_value()), (2.0, 5.0));
        assert_eq!(slider.int_slider().range(), (4, 10));
    }

    #[test]
    fn test_set_single_step_requantizes() {
        let mut slider = DoubleRangeSlider::new(0.0, 10.0, 1.0);
        slider.set_values(2.0, 4.0);
        slider.set_single_step(0.1);
        assert_eq!(slider.int_slider().range(), (0, 100));
        assert_eq!(slider.int_slider().minimum_value(), 20);
        assert_eq!((slider.minimum_value(), slider.maximum_value()), (2.0, 4.0));

        slider.set_single_step(-1.0);
        assert_eq!(slider.single_step(), 0.1);
    }

    #[test]
    fn test_uneven_single_step_keeps_values() {
        let mut slider = DoubleRangeSlider::new(0.5, 9.5, 1.0);
        slider.set_values(0.5, 9.5);
        slider.set_single_step(0.3);
        assert_eq!(slider.int_slider().range(), (2, 32));
        assert_eq!(
            (slider.int_slider().minimum_value(), slider.int_slider().maximum_value()),
            (2, 32)
        );
        assert_eq!((slider.minimum_value(), slider.maximum_value()), (0.5, 9.5));
    }

    #[test]
    fn test_drag_reports_f64_values() {
        let mut slider = DoubleRangeSlider::new(0.0, 10.0, 0.1);
        slider.set_values(2.0, 8.0);
        let geometry =
            LinearSliderGeometry::from_size(Size::new(112.0, 20.0), SliderStyle::default());

        // Minimum handle origin at pixel 20
        let events = slider.press(
            &geometry,
            PointerPress {
                position: Point::new(22.0, 10.0),
                chord: false,
            },
        );
        assert_eq!(events, vec![RangeSliderEvent::SliderPressed(Handle::Minimum)]);

        let events = slider.drag(&geometry, Point::new(52.0, 10.0));
        assert!((slider.minimum_value() - 5.0).abs() < 1e-9);
        assert!(events
            .iter()
            .any(|e| matches!(e, RangeSliderEvent::ValuesChanged(lo, _) if (lo - 5.0).abs() < 1e-9)));
        assert_eq!(slider.maximum_value(), 8.0);
    }

    #[test]
    fn test_drag_keeps_exact_value_of_other_handle() {
        let mut slider = DoubleRangeSlider::new(0.0, 99.0, 1.0);
        slider.set_values(20.0, 80.4);
        let geometry =
            LinearSliderGeometry::from_size(Size::new(111.0, 20.0), SliderStyle::default());
        slider.press(
            &geometry,
            PointerPress {
                position: Point::new(21.0, 10.0),
                chord: false,
            },
        );
        slider.drag(&geometry, Point::new(31.0, 10.0));
        assert_eq!(slider.minimum_value(), 30.0);
        assert_eq!(slider.maximum_value(), 80.4);
    }
}
