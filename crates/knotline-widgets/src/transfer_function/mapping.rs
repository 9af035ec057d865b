//! Affine mapping between a transfer function's domain and a pixel rectangle
//!
//! x grows to the right, the ordinate grows upwards (pixel y is flipped).

use iced::{Point, Rectangle};
use knotline_core::{SubPoint, TransferFunction};

/// Domain to pixel transform for one rendering pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainMapping {
    rect: Rectangle,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl DomainMapping {
    pub fn new(rect: Rectangle, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        debug_assert!(x_range.1 > x_range.0, "zero-width domain {:?}", x_range);
        Self {
            rect,
            x_range,
            y_range,
        }
    }

    /// Mapping for a data source: its domain on x, its value range on y
    pub fn for_function<F>(function: &F, rect: Rectangle) -> Self
    where
        F: TransferFunction + ?Sized,
    {
        Self::new(
            rect,
            function.range(),
            (function.min_value().y(), function.max_value().y()),
        )
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    fn x_scale(&self) -> f64 {
        scale(self.rect.width, self.x_range)
    }

    fn y_scale(&self) -> f64 {
        scale(self.rect.height, self.y_range)
    }

    pub fn map_x(&self, x: f64) -> f32 {
        self.rect.x + ((x - self.x_range.0) * self.x_scale()) as f32
    }

    pub fn map_y(&self, y: f64) -> f32 {
        self.rect.y + self.rect.height - ((y - self.y_range.0) * self.y_scale()) as f32
    }

    pub fn map(&self, point: SubPoint) -> Point {
        Point::new(self.map_x(point.x), self.map_y(point.value.y()))
    }

    /// Domain abscissa under pixel `x`, clamped to the domain
    pub fn inverse_x(&self, x: f32) -> f64 {
        let scale = self.x_scale();
        if scale == 0.0 {
            return self.x_range.0;
        }
        let v = self.x_range.0 + (x - self.rect.x) as f64 / scale;
        v.clamp(self.x_range.0, self.x_range.1)
    }

    /// Ordinate scaled into `0.0..=1.0` over the value range
    pub fn normalize_y(&self, y: f64) -> f32 {
        let span = self.y_range.1 - self.y_range.0;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((y - self.y_range.0) / span).clamp(0.0, 1.0) as f32
    }
}

/// Pixels per domain unit; degenerate ranges collapse to 0
fn scale(pixels: f32, range: (f64, f64)) -> f64 {
    let span = range.1 - range.0;
    if span == 0.0 || !span.is_finite() {
        0.0
    } else {
        pixels as f64 / span
    }
}
