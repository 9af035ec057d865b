//! Shared theme constants for the knotline widgets
//!
//! Constant colors only; there is no runtime theming.

use iced::Color;
use knotline_core::Rgba;

/// Slider groove background
pub const GROOVE_COLOR: Color = Color::from_rgb(0.16, 0.16, 0.19);

/// Groove border
pub const GROOVE_BORDER_COLOR: Color = Color::from_rgb(0.3, 0.3, 0.35);

/// Selected range between the two handles
pub const RANGE_COLOR: Color = Color::from_rgb(0.25, 0.5, 0.75);

/// Handle fill at rest
pub const HANDLE_COLOR: Color = Color::from_rgb(0.75, 0.75, 0.78);

/// Handle fill while being dragged
pub const HANDLE_ACTIVE_COLOR: Color = Color::from_rgb(1.0, 0.8, 0.3);

/// Curve stroke: white at 191/255 alpha
pub const CURVE_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 191.0 / 255.0);

/// Control point marker fill
pub const MARKER_COLOR: Color = Color::from_rgba(0.749, 0.749, 0.749, 127.0 / 255.0);

/// Marker fill while selected
pub const MARKER_ACTIVE_COLOR: Color = Color::from_rgba(1.0, 0.8, 0.3, 0.8);

/// Transfer function canvas background
pub const CURVE_BACKGROUND: Color = Color::from_rgb(0.1, 0.1, 0.12);

/// Convert a core color to an iced color
pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}
