//! Dual-handle range slider model
//!
//! The slider keeps two pairs of integers:
//!
//! - **values**: the committed range, what the application reads
//! - **positions**: where the handles are drawn
//!
//! They only differ mid-drag when tracking is disabled, which lets the user
//! preview a range before it is committed on release.

use super::geometry::{LinearSliderGeometry, SliderGeometry, SliderStyle};
use iced::{Point, Rectangle, Size};

/// One of the two slider handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Minimum,
    Maximum,
}

/// Change notifications produced by slider mutations
///
/// Generic over the value type so [`super::DoubleRangeSlider`] can reuse it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeSliderEvent<T = i32> {
    MinimumValueChanged(T),
    MaximumValueChanged(T),
    /// Emitted once per mutation when either value changed
    ValuesChanged(T, T),
    MinimumPositionChanged(T),
    MaximumPositionChanged(T),
    /// Emitted once per mutation when either position changed mid-drag
    PositionsChanged(T, T),
    /// A tracked handle move is about to be committed
    SliderMoved(T, T),
    SliderPressed(Handle),
    SliderReleased,
}

/// Pointer press as seen by the slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub position: Point,
    /// Other buttons were already held when this one went down
    pub chord: bool,
}

/// Pointer input published by the slider canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderInputKind {
    Press(PointerPress),
    /// Pointer moved while a button is held, widget-local (may lie outside)
    Move(Point),
    Release,
}

/// Pointer input plus the widget size it was measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderInput {
    pub kind: SliderInputKind,
    pub bounds: Size,
}

impl SliderInput {
    /// Linear geometry for the widget this input came from
    pub fn geometry(&self, style: SliderStyle) -> LinearSliderGeometry {
        LinearSliderGeometry::from_size(self.bounds, style)
    }
}

/// Range slider state
#[derive(Debug, Clone)]
pub struct RangeSlider {
    minimum: i32,
    maximum: i32,
    minimum_value: i32,
    maximum_value: i32,
    minimum_position: i32,
    maximum_position: i32,
    /// Handle owning the current drag
    active: Option<Handle>,
    /// Handle drawn last (on top)
    selected: Handle,
    tracking: bool,
    /// Pointer distance from the active handle's origin along the main axis
    click_offset: f32,
    /// Value of the active handle when the drag started
    press_value: i32,
    needs_redraw: bool,
}

impl Default for RangeSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeSlider {
    /// Slider over `0..=100` selecting the whole range
    pub fn new() -> Self {
        Self::with_range(0, 100)
    }

    /// Slider over `minimum..=maximum` selecting the whole range
    pub fn with_range(minimum: i32, maximum: i32) -> Self {
        let (minimum, maximum) = (minimum.min(maximum), minimum.max(maximum));
        Self {
            minimum,
            maximum,
            minimum_value: minimum,
            maximum_value: maximum,
            minimum_position: minimum,
            maximum_position: maximum,
            active: None,
            selected: Handle::Minimum,
            tracking: true,
            click_offset: 0.0,
            press_value: 0,
            needs_redraw: true,
        }
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn range(&self) -> (i32, i32) {
        (self.minimum, self.maximum)
    }

    pub fn minimum_value(&self) -> i32 {
        self.minimum_value
    }

    pub fn maximum_value(&self) -> i32 {
        self.maximum_value
    }

    pub fn minimum_position(&self) -> i32 {
        self.minimum_position
    }

    pub fn maximum_position(&self) -> i32 {
        self.maximum_position
    }

    pub fn has_tracking(&self) -> bool {
        self.tracking
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    /// Handle currently being dragged
    pub fn active_handle(&self) -> Option<Handle> {
        self.active
    }

    pub fn is_slider_down(&self) -> bool {
        self.active.is_some()
    }

    /// Handles in paint order: the last one is drawn on top
    pub fn paint_order(&self) -> [Handle; 2] {
        match self.selected {
            Handle::Minimum => [Handle::Maximum, Handle::Minimum],
            Handle::Maximum => [Handle::Minimum, Handle::Maximum],
        }
    }

    /// Position of one handle
    pub fn position(&self, handle: Handle) -> i32 {
        match handle {
            Handle::Minimum => self.minimum_position,
            Handle::Maximum => self.maximum_position,
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    fn bound(&self, v: i32) -> i32 {
        v.clamp(self.minimum, self.maximum)
    }

    /// Change the slider bounds and re-clamp the current values
    pub fn set_range(&mut self, minimum: i32, maximum: i32) -> Vec<RangeSliderEvent> {
        let (minimum, maximum) = (minimum.min(maximum), minimum.max(maximum));
        if (minimum, maximum) == (self.minimum, self.maximum) {
            return Vec::new();
        }
        self.minimum = minimum;
        self.maximum = maximum;
        self.request_redraw();
        self.set_values(self.minimum_value, self.maximum_value)
    }

    /// Commit both values
    ///
    /// Inputs are clamped to the slider range and reordered. Positions are
    /// forced to the new values, dropping any drag preview.
    pub fn set_values(&mut self, lo: i32, hi: i32) -> Vec<RangeSliderEvent> {
        let minimum_value = self.bound(lo.min(hi));
        let maximum_value = self.bound(lo.max(hi));
        let min_value_changed = minimum_value != self.minimum_value;
        let max_value_changed = maximum_value != self.maximum_value;
        self.minimum_value = minimum_value;
        self.maximum_value = maximum_value;

        let min_position_changed = minimum_value != self.minimum_position;
        let max_position_changed = maximum_value != self.maximum_position;
        self.minimum_position = minimum_value;
        self.maximum_position = maximum_value;

        let mut events = Vec::new();
        if self.is_slider_down() {
            self.push_position_events(&mut events, min_position_changed, max_position_changed);
        }
        if min_value_changed {
            events.push(RangeSliderEvent::MinimumValueChanged(minimum_value));
        }
        if max_value_changed {
            events.push(RangeSliderEvent::MaximumValueChanged(maximum_value));
        }
        if min_value_changed || max_value_changed {
            events.push(RangeSliderEvent::ValuesChanged(minimum_value, maximum_value));
        }
        if min_position_changed || max_position_changed || min_value_changed || max_value_changed
        {
            self.request_redraw();
        }
        events
    }

    /// Move both handles
    ///
    /// With tracking the new positions are committed immediately; without it
    /// only the handles move until [`Self::commit_positions`].
    pub fn set_positions(&mut self, lo: i32, hi: i32) -> Vec<RangeSliderEvent> {
        let minimum_position = self.bound(lo.min(hi));
        let maximum_position = self.bound(lo.max(hi));
        let min_changed = minimum_position != self.minimum_position;
        let max_changed = maximum_position != self.maximum_position;
        if !min_changed && !max_changed {
            return Vec::new();
        }

        self.minimum_position = minimum_position;
        self.maximum_position = maximum_position;

        let mut events = Vec::new();
        if !self.tracking {
            self.request_redraw();
        }
        if self.is_slider_down() {
            self.push_position_events(&mut events, min_changed, max_changed);
        }
        if self.tracking {
            events.push(RangeSliderEvent::SliderMoved(
                self.minimum_position,
                self.maximum_position,
            ));
            events.extend(self.set_values(self.minimum_position, self.maximum_position));
        }
        events
    }

    /// Move the minimum handle, pushing the maximum handle up if needed
    pub fn set_minimum_position(&mut self, position: i32) -> Vec<RangeSliderEvent> {
        self.set_positions(position, position.max(self.maximum_position))
    }

    /// Move the maximum handle, pushing the minimum handle down if needed
    pub fn set_maximum_position(&mut self, position: i32) -> Vec<RangeSliderEvent> {
        self.set_positions(position.min(self.minimum_position), position)
    }

    pub fn set_minimum_value(&mut self, value: i32) -> Vec<RangeSliderEvent> {
        self.set_values(value, value.max(self.maximum_value))
    }

    pub fn set_maximum_value(&mut self, value: i32) -> Vec<RangeSliderEvent> {
        self.set_values(value.min(self.minimum_value), value)
    }

    /// Commit the handle positions as values
    pub fn commit_positions(&mut self) -> Vec<RangeSliderEvent> {
        self.set_values(self.minimum_position, self.maximum_position)
    }

    fn push_position_events(
        &self,
        events: &mut Vec<RangeSliderEvent>,
        min_changed: bool,
        max_changed: bool,
    ) {
        if min_changed {
            events.push(RangeSliderEvent::MinimumPositionChanged(self.minimum_position));
        }
        if max_changed {
            events.push(RangeSliderEvent::MaximumPositionChanged(self.maximum_position));
        }
        if min_changed || max_changed {
            events.push(RangeSliderEvent::PositionsChanged(
                self.minimum_position,
                self.maximum_position,
            ));
        }
    }

    /// Rectangle between the two handle centers, for drawing the selected range
    pub fn selection_rect(&self, geometry: &impl SliderGeometry) -> Rectangle {
        let lo = geometry.handle_rect(self.range(), self.minimum_position);
        let hi = geometry.handle_rect(self.range(), self.maximum_position);
        let (a, b) = (lo.center(), hi.center());
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Rectangle {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pointer handling
    // ─────────────────────────────────────────────────────────────────────

    /// Pointer pressed: try to grab a handle
    ///
    /// The minimum handle is tested first, so it wins when the handles overlap.
    /// Presses are ignored on an empty range or when other buttons are held.
    pub fn press(
        &mut self,
        geometry: &impl SliderGeometry,
        press: PointerPress,
    ) -> Vec<RangeSliderEvent> {
        if self.minimum == self.maximum || press.chord {
            return Vec::new();
        }

        let mut events = Vec::new();
        for handle in [Handle::Minimum, Handle::Maximum] {
            if self.is_slider_down() {
                break;
            }
            let rect = geometry.handle_rect(self.range(), self.position(handle));
            if !rect.contains(press.position) {
                continue;
            }
            self.active = Some(handle);
            self.selected = handle;
            self.press_value = match handle {
                Handle::Minimum => self.minimum_value,
                Handle::Maximum => self.maximum_value,
            };
            self.click_offset =
                geometry.main_axis(press.position) - geometry.main_axis(rect.position());
            self.request_redraw();
            log::debug!("range slider: grabbed {:?} handle at {}", handle, self.press_value);
            events.push(RangeSliderEvent::SliderPressed(handle));
        }
        events
    }

    /// Pointer moved: drag the active handle
    ///
    /// Past the geometry's maximum drag distance the handle snaps back to the
    /// value it had when the drag started.
    pub fn drag(
        &mut self,
        geometry: &impl SliderGeometry,
        position: Point,
    ) -> Vec<RangeSliderEvent> {
        let Some(handle) = self.active else {
            return Vec::new();
        };

        let mut new_position =
            geometry.pixel_to_value(self.range(), geometry.main_axis(position) - self.click_offset);

        if let Some(m) = geometry.maximum_drag_distance() {
            let bounds = geometry.bounds();
            let allowed = Rectangle {
                x: bounds.x - m,
                y: bounds.y - m,
                width: bounds.width + 2.0 * m,
                height: bounds.height + 2.0 * m,
            };
            if !allowed.contains(position) {
                new_position = self.press_value;
            }
        }

        match handle {
            Handle::Minimum => {
                self.set_minimum_position(new_position.min(self.maximum_position))
            }
            Handle::Maximum => {
                self.set_maximum_position(self.minimum_position.max(new_position))
            }
        }
    }

    /// Pointer released: drop the active handle
    ///
    /// Always requests a redraw so the pressed highlight disappears. Without
    /// tracking, the previewed positions are committed here.
    pub fn release(&mut self) -> Vec<RangeSliderEvent> {
        let was_down = self.active.take().is_some();
        self.request_redraw();

        let mut events = Vec::new();
        if was_down {
            events.push(RangeSliderEvent::SliderReleased);
            if !self.tracking {
                log::debug!(
                    "range slider: committing [{}, {}]",
                    self.minimum_position,
                    self.maximum_position
                );
                events.extend(self.commit_positions());
            }
        }
        events
    }

    /// Dispatch a canvas input against a linear geometry
    pub fn handle_input(
        &mut self,
        input: &SliderInput,
        style: SliderStyle,
    ) -> Vec<RangeSliderEvent> {
        let geometry = input.geometry(style);
        match input.kind {
            SliderInputKind::Press(press) => self.press(&geometry, press),
            SliderInputKind::Move(position) => self.drag(&geometry, position),
            SliderInputKind::Release => self.release(),
        }
    }
}
