//! Slider geometry: where handles sit and how pixels map back to values
//!
//! [`SliderGeometry`] is the only thing the range slider model knows about
//! the host widget. [`LinearSliderGeometry`] is the stock implementation for
//! a plain groove filling the widget bounds.

use iced::{Point, Rectangle, Size};

/// Slider direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Style-dependent geometry queries
///
/// All coordinates are widget-local. `range` is the slider's `(minimum, maximum)`.
pub trait SliderGeometry {
    /// Widget bounds
    fn bounds(&self) -> Rectangle;

    /// Groove rectangle the handles travel along
    fn groove_rect(&self) -> Rectangle;

    /// Handle rectangle for a handle at `position`
    fn handle_rect(&self, range: (i32, i32), position: i32) -> Rectangle;

    /// Value whose handle origin sits at `pixel` along the main axis
    fn pixel_to_value(&self, range: (i32, i32), pixel: f32) -> i32;

    /// Coordinate of `point` along the main axis
    fn main_axis(&self, point: Point) -> f32;

    /// Distance outside the bounds past which a drag snaps back
    fn maximum_drag_distance(&self) -> Option<f32>;
}

/// Visual parameters of a linear slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    pub orientation: Orientation,
    /// Handle length along the groove, in pixels
    pub handle_length: f32,
    /// Flip the value direction
    pub inverted: bool,
    pub maximum_drag_distance: Option<f32>,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            handle_length: 12.0,
            inverted: false,
            maximum_drag_distance: Some(60.0),
        }
    }
}

impl SliderStyle {
    /// Style from widget config values
    pub fn from_config(config: &knotline_core::WidgetConfig) -> Self {
        Self {
            handle_length: config.handle_length,
            maximum_drag_distance: config.maximum_drag_distance,
            ..Self::default()
        }
    }
}

/// Groove spanning the whole widget, handles of fixed length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSliderGeometry {
    bounds: Rectangle,
    style: SliderStyle,
}

impl LinearSliderGeometry {
    pub fn new(bounds: Rectangle, style: SliderStyle) -> Self {
        Self { bounds, style }
    }

    /// Geometry for a widget of `size` with its origin at (0, 0)
    pub fn from_size(size: Size, style: SliderStyle) -> Self {
        Self::new(Rectangle::new(Point::ORIGIN, size), style)
    }

    pub fn style(&self) -> &SliderStyle {
        &self.style
    }

    /// Vertical sliders grow upwards, so their values run against the pixel axis
    fn upside_down(&self) -> bool {
        match self.style.orientation {
            Orientation::Horizontal => self.style.inverted,
            Orientation::Vertical => !self.style.inverted,
        }
    }

    fn groove_length(&self) -> f32 {
        match self.style.orientation {
            Orientation::Horizontal => self.bounds.width,
            Orientation::Vertical => self.bounds.height,
        }
    }

    fn groove_start(&self) -> f32 {
        match self.style.orientation {
            Orientation::Horizontal => self.bounds.x,
            Orientation::Vertical => self.bounds.y,
        }
    }

    /// Pixels available to the handle origin
    fn span(&self) -> f32 {
        (self.groove_length() - self.handle_length()).max(0.0)
    }

    fn handle_length(&self) -> f32 {
        self.style.handle_length.min(self.groove_length()).max(0.0)
    }
}

impl SliderGeometry for LinearSliderGeometry {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn groove_rect(&self) -> Rectangle {
        self.bounds
    }

    fn handle_rect(&self, range: (i32, i32), position: i32) -> Rectangle {
        let offset =
            position_from_value(range.0, range.1, position, self.span(), self.upside_down());
        let length = self.handle_length();
        match self.style.orientation {
            Orientation::Horizontal => Rectangle {
                x: self.bounds.x + offset,
                y: self.bounds.y,
                width: length,
                height: self.bounds.height,
            },
            Orientation::Vertical => Rectangle {
                x: self.bounds.x,
                y: self.bounds.y + offset,
                width: self.bounds.width,
                height: length,
            },
        }
    }

    fn pixel_to_value(&self, range: (i32, i32), pixel: f32) -> i32 {
        value_from_position(
            range.0,
            range.1,
            pixel - self.groove_start(),
            self.span(),
            self.upside_down(),
        )
    }

    fn main_axis(&self, point: Point) -> f32 {
        match self.style.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    fn maximum_drag_distance(&self) -> Option<f32> {
        self.style.maximum_drag_distance
    }
}

/// Value for a handle origin `pos` pixels into a groove of `span` pixels
///
/// Rounds to the nearest value, like a native slider.
pub fn value_from_position(min: i32, max: i32, pos: f32, span: f32, upside_down: bool) -> i32 {
    if span <= 0.0 || pos <= 0.0 || max <= min {
        return if upside_down { max } else { min };
    }
    if pos >= span {
        return if upside_down { min } else { max };
    }
    let range = max as i64 - min as i64;
    let step = ((pos as f64) * range as f64 / span as f64).round() as i64;
    let value = if upside_down {
        max as i64 - step
    } else {
        min as i64 + step
    };
    value as i32
}

/// Pixel offset of the handle origin for `value`, rounded to whole pixels
pub fn position_from_value(min: i32, max: i32, value: i32, span: f32, upside_down: bool) -> f32 {
    if span <= 0.0 || max <= min {
        return 0.0;
    }
    let value = value.clamp(min, max) as i64;
    let range = max as i64 - min as i64;
    let p = if upside_down {
        max as i64 - value
    } else {
        value - min as i64
    };
    ((p as f64) * span as f64 / range as f64).round() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(width: f32) -> LinearSliderGeometry {
        LinearSliderGeometry::from_size(Size::new(width, 20.0), SliderStyle::default())
    }

    #[test]
    fn test_value_from_position_edges() {
        assert_eq!(value_from_position(0, 100, -5.0, 200.0, false), 0);
        assert_eq!(value_from_position(0, 100, 250.0, 200.0, false), 100);
        assert_eq!(value_from_position(0, 100, 100.0, 200.0, false), 50);
        assert_eq!(value_from_position(0, 100, 100.0, 200.0, true), 50);
        assert_eq!(value_from_position(0, 100, 50.0, 200.0, true), 75);
    }

    #[test]
    fn test_value_position_roundtrip() {
        // span larger than the range: every value has its own pixel
        for value in 0..=100 {
            let pixel = position_from_value(0, 100, value, 288.0, false);
            assert_eq!(value_from_position(0, 100, pixel, 288.0, false), value);
        }
    }

    #[test]
    fn test_handle_rect_horizontal() {
        let geometry = horizontal(112.0);
        // span = 112 - 12 = 100 pixels for 0..100
        let rect = geometry.handle_rect((0, 100), 25);
        assert_eq!(rect.x, 25.0);
        assert_eq!(rect.width, 12.0);
        assert_eq!(rect.height, 20.0);
        assert_eq!(geometry.pixel_to_value((0, 100), 25.0), 25);
    }

    #[test]
    fn test_vertical_minimum_is_at_bottom() {
        let style = SliderStyle {
            orientation: Orientation::Vertical,
            ..SliderStyle::default()
        };
        let geometry = LinearSliderGeometry::from_size(Size::new(20.0, 112.0), style);
        let bottom = geometry.handle_rect((0, 100), 0);
        let top = geometry.handle_rect((0, 100), 100);
        assert_eq!(bottom.y, 100.0);
        assert_eq!(top.y, 0.0);
        assert_eq!(geometry.main_axis(Point::new(3.0, 40.0)), 40.0);
        assert_eq!(geometry.pixel_to_value((0, 100), 100.0), 0);
    }

    #[test]
    fn test_handle_never_exceeds_groove() {
        let geometry = horizontal(8.0);
        let rect = geometry.handle_rect((0, 100), 100);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 8.0);
    }
}
