//! Painter primitives produced by the curve renderers
//!
//! Plain data so the interpolation walk can be tested without a GPU; the
//! canvas programs replay these onto an iced `Frame`.

use iced::{Color, Point, Rectangle};

/// One filled band of the gradient strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientFill {
    /// Flat fill, used when the function has no points
    Solid { rect: Rectangle, color: Color },
    /// Left-to-right gradient from `start_x` (color `from`) to `end_x` (color `to`)
    ///
    /// `rect` may extend past the gradient line at the strip's outer edges.
    Linear {
        rect: Rectangle,
        start_x: f32,
        end_x: f32,
        from: Color,
        to: Color,
    },
}

impl GradientFill {
    pub fn rect(&self) -> Rectangle {
        match self {
            GradientFill::Solid { rect, .. } | GradientFill::Linear { rect, .. } => *rect,
        }
    }
}

/// Path segment in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

/// Stroked curve plus one marker center per control point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePath {
    pub commands: Vec<PathCommand>,
    pub markers: Vec<Point>,
}

impl CurvePath {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the path draws anything beyond its starting point
    pub fn has_segments(&self) -> bool {
        self.commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_)))
    }
}
