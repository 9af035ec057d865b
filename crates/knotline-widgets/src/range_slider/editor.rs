//! Range editor: a double range slider with change/commit semantics
//!
//! The editor reports two kinds of notifications:
//!
//! - `...IsChanging` for every intermediate value the slider goes through
//! - `...Changed` for committed values
//!
//! With tracking enabled both are emitted together. With tracking disabled a
//! drag only produces `...IsChanging` and the readable values stay frozen at
//! their pre-drag snapshot until the handle is released.

use super::double::DoubleRangeSlider;
use super::geometry::{SliderGeometry, SliderStyle};
use super::state::{PointerPress, RangeSlider, RangeSliderEvent, SliderInput};
use iced::Point;
use knotline_core::config::RangeConfig;

/// Notifications produced by [`RangeEditor`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEditorEvent {
    MinimumValueIsChanging(f64),
    MaximumValueIsChanging(f64),
    MinimumValueChanged(f64),
    MaximumValueChanged(f64),
}

/// Range editor state
#[derive(Debug, Clone)]
pub struct RangeEditor {
    slider: DoubleRangeSlider,
    tracking: bool,
    changing: bool,
    minimum_before_change: f64,
    maximum_before_change: f64,
    decimals: usize,
    prefix: String,
    suffix: String,
}

impl Default for RangeEditor {
    fn default() -> Self {
        Self::from_config(&RangeConfig::default(), true)
    }
}

impl RangeEditor {
    /// Editor over `minimum..=maximum` selecting the whole range
    pub fn new(minimum: f64, maximum: f64, single_step: f64) -> Self {
        Self::from_config(
            &RangeConfig {
                minimum,
                maximum,
                single_step,
                ..RangeConfig::default()
            },
            true,
        )
    }

    pub fn from_config(config: &RangeConfig, tracking: bool) -> Self {
        let minimum = round_to(config.minimum, config.decimals);
        let maximum = round_to(config.maximum, config.decimals);
        Self {
            slider: DoubleRangeSlider::new(minimum, maximum, config.validated_single_step()),
            tracking,
            changing: false,
            minimum_before_change: 0.0,
            maximum_before_change: 0.0,
            decimals: config.decimals,
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
        }
    }

    pub fn slider(&self) -> &DoubleRangeSlider {
        &self.slider
    }

    /// Integer slider underneath, for drawing
    pub fn int_slider(&self) -> &RangeSlider {
        self.slider.int_slider()
    }

    pub fn take_redraw(&mut self) -> bool {
        self.slider.take_redraw()
    }

    pub fn minimum(&self) -> f64 {
        self.slider.minimum()
    }

    pub fn maximum(&self) -> f64 {
        self.slider.maximum()
    }

    /// Committed minimum: the pre-drag snapshot while changing
    pub fn minimum_value(&self) -> f64 {
        if self.changing {
            self.minimum_before_change
        } else {
            self.slider.minimum_value()
        }
    }

    /// Committed maximum: the pre-drag snapshot while changing
    pub fn maximum_value(&self) -> f64 {
        if self.changing {
            self.maximum_before_change
        } else {
            self.slider.maximum_value()
        }
    }

    /// Values the slider currently shows, including an uncommitted drag
    pub fn live_values(&self) -> (f64, f64) {
        (self.slider.minimum_value(), self.slider.maximum_value())
    }

    pub fn is_changing(&self) -> bool {
        self.changing
    }

    pub fn has_tracking(&self) -> bool {
        self.tracking
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub fn single_step(&self) -> f64 {
        self.slider.single_step()
    }

    pub fn set_single_step(&mut self, step: f64) {
        self.slider.set_single_step(step);
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn set_decimals(&mut self, decimals: usize) {
        self.decimals = decimals;
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
    }

    /// Label text for a value: prefix, value with `decimals` digits, suffix
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{:.*}{}", self.prefix, self.decimals, value, self.suffix)
    }

    /// Change the bounds; they are rounded to the displayed decimals first
    pub fn set_range(&mut self, minimum: f64, maximum: f64) -> Vec<RangeEditorEvent> {
        let minimum = round_to(minimum, self.decimals);
        let maximum = round_to(maximum, self.decimals);
        let events = self.slider.set_range(minimum, maximum);
        self.dispatch(events)
    }

    /// Set the minimum value, never past the current maximum
    ///
    /// Always reports `MinimumValueChanged` when the value moves, even mid-drag.
    pub fn set_minimum_value(&mut self, value: f64) -> Vec<RangeEditorEvent> {
        let value = value.min(self.slider.maximum_value());
        self.outside_change(|slider| slider.set_minimum_value(value))
    }

    /// Set the maximum value, never below the current minimum
    pub fn set_maximum_value(&mut self, value: f64) -> Vec<RangeEditorEvent> {
        let value = value.max(self.slider.minimum_value());
        self.outside_change(|slider| slider.set_maximum_value(value))
    }

    /// Select the whole range
    pub fn reset(&mut self) -> Vec<RangeEditorEvent> {
        let mut events = self.set_minimum_value(self.minimum());
        events.extend(self.set_maximum_value(self.maximum()));
        events
    }

    fn outside_change(
        &mut self,
        change: impl FnOnce(&mut DoubleRangeSlider) -> Vec<RangeSliderEvent<f64>>,
    ) -> Vec<RangeEditorEvent> {
        let was_changing = std::mem::replace(&mut self.changing, false);
        let events = change(&mut self.slider);
        let out = self.dispatch(events);
        self.changing = was_changing;
        out
    }

    /// Snapshot the values at the start of an untracked drag
    pub fn start_changing(&mut self) {
        if self.tracking {
            return;
        }
        self.minimum_before_change = self.minimum_value();
        self.maximum_before_change = self.maximum_value();
        self.changing = true;
        log::debug!(
            "RangeEditor: changing from [{}, {}]",
            self.minimum_before_change,
            self.maximum_before_change
        );
    }

    /// End an untracked drag, reporting the values that moved
    pub fn stop_changing(&mut self) -> Vec<RangeEditorEvent> {
        if self.tracking {
            return Vec::new();
        }
        self.changing = false;

        let epsilon = self.single_step() * 1e-9;
        let mut events = Vec::new();
        if (self.minimum_value() - self.minimum_before_change).abs() > epsilon {
            events.push(RangeEditorEvent::MinimumValueChanged(self.minimum_value()));
        }
        if (self.maximum_value() - self.maximum_before_change).abs() > epsilon {
            events.push(RangeEditorEvent::MaximumValueChanged(self.maximum_value()));
        }
        events
    }

    pub fn press(
        &mut self,
        geometry: &impl SliderGeometry,
        press: PointerPress,
    ) -> Vec<RangeEditorEvent> {
        let events = self.slider.press(geometry, press);
        self.dispatch(events)
    }

    pub fn drag(
        &mut self,
        geometry: &impl SliderGeometry,
        position: Point,
    ) -> Vec<RangeEditorEvent> {
        let events = self.slider.drag(geometry, position);
        self.dispatch(events)
    }

    pub fn release(&mut self) -> Vec<RangeEditorEvent> {
        let events = self.slider.release();
        self.dispatch(events)
    }

    pub fn handle_input(
        &mut self,
        input: &SliderInput,
        style: SliderStyle,
    ) -> Vec<RangeEditorEvent> {
        let events = self.slider.handle_input(input, style);
        self.dispatch(events)
    }

    fn dispatch(&mut self, events: Vec<RangeSliderEvent<f64>>) -> Vec<RangeEditorEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                RangeSliderEvent::SliderPressed(_) => self.start_changing(),
                RangeSliderEvent::SliderReleased => out.extend(self.stop_changing()),
                RangeSliderEvent::MinimumValueChanged(v) => {
                    out.push(RangeEditorEvent::MinimumValueIsChanging(v));
                    if !self.changing {
                        out.push(RangeEditorEvent::MinimumValueChanged(v));
                    }
                }
                RangeSliderEvent::MaximumValueChanged(v) => {
                    out.push(RangeEditorEvent::MaximumValueIsChanging(v));
                    if !self.changing {
                        out.push(RangeEditorEvent::MaximumValueChanged(v));
                    }
                }
                _ => {}
            }
        }
        out
    }
}

/// Round to the number of decimals a label can show
fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_slider::geometry::LinearSliderGeometry;
    use iced::Size;

    /// 111px wide slider over 0..=99: one pixel per unit
    fn geometry() -> LinearSliderGeometry {
        LinearSliderGeometry::from_size(Size::new(111.0, 20.0), SliderStyle::default())
    }

    fn press_at(x: f32) -> PointerPress {
        PointerPress {
            position: Point::new(x, 10.0),
            chord: false,
        }
    }

    #[test]
    fn test_defaults() {
        let editor = RangeEditor::default();
        assert_eq!((editor.minimum(), editor.maximum()), (0.0, 99.0));
        assert_eq!((editor.minimum_value(), editor.maximum_value()), (0.0, 99.0));
        assert_eq!(editor.single_step(), 1.0);
        assert_eq!(editor.decimals(), 2);
        assert!(editor.has_tracking());
    }

    #[test]
    fn test_tracking_drag_emits_changed_immediately() {
        let mut editor = RangeEditor::default();
        editor.press(&geometry(), press_at(2.0));
        let events = editor.drag(&geometry(), Point::new(12.0, 10.0));
        assert_eq!(
            events,
            vec![
                RangeEditorEvent::MinimumValueIsChanging(10.0),
                RangeEditorEvent::MinimumValueChanged(10.0),
            ]
        );
        assert!(editor.release().is_empty());
        assert_eq!(editor.minimum_value(), 10.0);
    }

    #[test]
    fn test_untracked_drag_commits_on_release() {
        let mut editor = RangeEditor::default();
        editor.set_tracking(false);

        editor.press(&geometry(), press_at(2.0));
        assert!(editor.is_changing());

        let events = editor.drag(&geometry(), Point::new(12.0, 10.0));
        assert_eq!(events, vec![RangeEditorEvent::MinimumValueIsChanging(10.0)]);
        assert_eq!(editor.minimum_value(), 0.0);
        assert_eq!(editor.live_values().0, 10.0);

        let events = editor.release();
        assert_eq!(events, vec![RangeEditorEvent::MinimumValueChanged(10.0)]);
        assert_eq!(editor.minimum_value(), 10.0);
        assert!(!editor.is_changing());
    }

    #[test]
    fn test_untracked_drag_back_to_start_reports_nothing() {
        let mut editor = RangeEditor::default();
        editor.set_tracking(false);
        editor.press(&geometry(), press_at(2.0));
        editor.drag(&geometry(), Point::new(12.0, 10.0));
        editor.drag(&geometry(), Point::new(2.0, 10.0));
        assert!(editor.release().is_empty());
    }

    #[test]
    fn test_programmatic_change_mid_drag_is_committed() {
        let mut editor = RangeEditor::default();
        editor.set_tracking(false);
        editor.press(&geometry(), press_at(2.0));

        let events = editor.set_maximum_value(50.0);
        assert_eq!(
            events,
            vec![
                RangeEditorEvent::MaximumValueIsChanging(50.0),
                RangeEditorEvent::MaximumValueChanged(50.0),
            ]
        );
        assert!(editor.is_changing());
    }

    #[test]
    fn test_minimum_cannot_pass_maximum() {
        let mut editor = RangeEditor::default();
        editor.set_maximum_value(40.0);
        editor.set_minimum_value(60.0);
        assert_eq!((editor.minimum_value(), editor.maximum_value()), (40.0, 40.0));
    }

    #[test]
    fn test_reset_selects_whole_range() {
        let mut editor = RangeEditor::new(-5.0, 5.0, 0.5);
        editor.set_minimum_value(-1.0);
        editor.set_maximum_value(2.0);
        let events = editor.reset();
        assert_eq!((editor.minimum_value(), editor.maximum_value()), (-5.0, 5.0));
        assert!(events.contains(&RangeEditorEvent::MinimumValueChanged(-5.0)));
        assert!(events.contains(&RangeEditorEvent::MaximumValueChanged(5.0)));
    }

    #[test]
    fn test_set_range_rounds_to_decimals() {
        let mut editor = RangeEditor::default();
        editor.set_range(0.123, 9.876);
        assert_eq!((editor.minimum(), editor.maximum()), (0.12, 9.88));
        assert_eq!((editor.minimum_value(), editor.maximum_value()), (0.12, 9.88));
    }

    #[test]
    fn test_format_value() {
        let mut editor = RangeEditor::default();
        editor.set_prefix("~");
        editor.set_suffix(" ms");
        editor.set_decimals(1);
        assert_eq!(editor.format_value(12.345), "~12.3 ms");
    }

    #[test]
    fn test_from_config() {
        let config = RangeConfig {
            minimum: 10.0,
            maximum: 20.0,
            single_step: 0.0,
            decimals: 0,
            prefix: String::new(),
            suffix: "%".to_string(),
        };
        let editor = RangeEditor::from_config(&config, false);
        assert_eq!(editor.single_step(), 1.0);
        assert!(!editor.has_tracking());
        assert_eq!(editor.format_value(15.0), "15%");
    }
}
