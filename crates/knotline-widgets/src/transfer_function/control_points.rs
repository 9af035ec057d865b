//! Curve renderer with draggable control point markers
//!
//! [`curve_path`] turns a transfer function into a [`CurvePath`]:
//!
//! - **Plain** segments become straight lines
//! - **Bezier** segments become one cubic through `(start, p1, p2, end)`
//! - **NonLinear** segments become a polyline through their sub-points
//!
//! [`ControlPointsItem`] adds marker hit-testing and dragging on top.

use super::mapping::DomainMapping;
use super::scene::{CurvePath, PathCommand};
use iced::{Point, Rectangle, Size};
use knotline_core::{ControlPointKind, TransferFunction};
use std::cell::{Ref, RefCell};

/// Build the curve and marker positions for `function` inside `rect`
///
/// With two or more points the curve is extended horizontally to both edges
/// of `rect`. A single point yields one marker and no line.
pub fn curve_path<F>(function: &F, rect: Rectangle) -> CurvePath
where
    F: TransferFunction + ?Sized,
{
    let count = function.count();
    let Some(mut start_cp) = function.control_point(0) else {
        return CurvePath::default();
    };

    let mapping = DomainMapping::for_function(function, rect);
    let start_pos = mapping.map(start_cp.point());
    let mut path = CurvePath {
        commands: Vec::with_capacity(count + 2),
        markers: Vec::with_capacity(count),
    };
    path.markers.push(start_pos);

    if count >= 2 && start_pos.x > rect.x {
        path.commands
            .push(PathCommand::MoveTo(Point::new(rect.x, start_pos.y)));
        path.commands.push(PathCommand::LineTo(start_pos));
    } else {
        path.commands.push(PathCommand::MoveTo(start_pos));
    }

    let mut current = start_pos;
    for i in 1..count {
        let Some(end_cp) = function.control_point(i) else {
            break;
        };
        match &start_cp.kind {
            ControlPointKind::NonLinear { .. } => {
                let points = start_cp.segment_points(&end_cp);
                for sub in points.iter().skip(1) {
                    current = mapping.map(*sub);
                    path.commands.push(PathCommand::LineTo(current));
                }
                let marker = points
                    .last()
                    .map(|sub| mapping.map(*sub))
                    .unwrap_or_else(|| mapping.map(end_cp.point()));
                path.markers.push(marker);
            }
            ControlPointKind::Bezier { .. } => {
                let [_, p1, p2, p3] = start_cp.bezier_params(&end_cp);
                current = mapping.map(p3);
                path.commands.push(PathCommand::CubicTo {
                    c1: mapping.map(p1),
                    c2: mapping.map(p2),
                    to: current,
                });
                path.markers.push(current);
            }
            ControlPointKind::Plain => {
                current = mapping.map(end_cp.point());
                path.commands.push(PathCommand::LineTo(current));
                path.markers.push(current);
            }
        }
        start_cp = end_cp;
    }

    let right = rect.x + rect.width;
    if count >= 2 && current.x < right {
        path.commands
            .push(PathCommand::LineTo(Point::new(right, current.y)));
    }
    path
}

/// Notifications produced while dragging markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveEvent {
    PointPressed(usize),
    /// The point was moved to domain abscissa `x`
    PointMoved { index: usize, x: f64 },
    PointReleased(usize),
}

/// Pointer input published by the curve canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveInputKind {
    Press(Point),
    /// Pointer moved while pressed, widget-local (may lie outside)
    Move(Point),
    Release,
}

/// Pointer input plus the widget size it was measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveInput {
    pub kind: CurveInputKind,
    pub bounds: Size,
}

impl CurveInput {
    /// Widget-local rendering rectangle
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(Point::ORIGIN, self.bounds)
    }
}

#[derive(Debug, Clone)]
struct CachedPath {
    source_id: u64,
    revision: u64,
    rect: Rectangle,
    path: CurvePath,
}

/// Control point markers with selection and drag state
#[derive(Debug, Clone)]
pub struct ControlPointsItem {
    /// Marker radius; the hit area is a square twice this size
    point_size: f32,
    selected: Option<usize>,
    cache: RefCell<Option<CachedPath>>,
}

impl Default for ControlPointsItem {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl ControlPointsItem {
    pub fn new(point_size: f32) -> Self {
        Self {
            point_size,
            selected: None,
            cache: RefCell::new(None),
        }
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Curve for `function` in `rect`, recomputed only when either changed
    pub fn path<F>(&self, function: &F, rect: Rectangle) -> Ref<'_, CurvePath>
    where
        F: TransferFunction + ?Sized,
    {
        let (source_id, revision) = (function.source_id(), function.revision());
        let stale = !matches!(
            &*self.cache.borrow(),
            Some(cached)
                if cached.source_id == source_id
                    && cached.revision == revision
                    && cached.rect == rect
        );
        if stale {
            *self.cache.borrow_mut() = Some(CachedPath {
                source_id,
                revision,
                rect,
                path: curve_path(function, rect),
            });
        }
        Ref::map(self.cache.borrow(), |cached| match cached {
            Some(cached) => &cached.path,
            None => &EMPTY_PATH,
        })
    }

    /// Index of the marker under `position`, nearest first
    pub fn marker_at<F>(&self, function: &F, rect: Rectangle, position: Point) -> Option<usize>
    where
        F: TransferFunction + ?Sized,
    {
        let half = self.point_size;
        let path = self.path(function, rect);
        let nearest = path
            .markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| {
                let hit = Rectangle {
                    x: marker.x - half,
                    y: marker.y - half,
                    width: 2.0 * half,
                    height: 2.0 * half,
                };
                hit.contains(position)
            })
            .min_by(|(_, a), (_, b)| a.distance(position).total_cmp(&b.distance(position)))
            .map(|(index, _)| index);
        nearest
    }

    /// Select the marker under the pointer, if any
    pub fn press<F>(
        &mut self,
        function: &F,
        rect: Rectangle,
        position: Point,
    ) -> Option<CurveEvent>
    where
        F: TransferFunction + ?Sized,
    {
        self.selected = self.marker_at(function, rect, position);
        if let Some(index) = self.selected {
            log::debug!("ControlPointsItem: selected point {}", index);
        }
        self.selected.map(CurveEvent::PointPressed)
    }

    /// Move the selected point to the abscissa under the pointer
    ///
    /// Only the position changes; the point's value is left alone.
    pub fn drag<F>(
        &mut self,
        function: &mut F,
        rect: Rectangle,
        position: Point,
    ) -> Option<CurveEvent>
    where
        F: TransferFunction + ?Sized,
    {
        let index = self.selected?;
        let x = DomainMapping::for_function(function, rect).inverse_x(position.x);
        function.set_control_point_pos(index, x);
        Some(CurveEvent::PointMoved { index, x })
    }

    pub fn release(&mut self) -> Option<CurveEvent> {
        self.selected.take().map(CurveEvent::PointReleased)
    }

    /// Dispatch a canvas input
    pub fn handle_input<F>(&mut self, function: &mut F, input: &CurveInput) -> Option<CurveEvent>
    where
        F: TransferFunction + ?Sized,
    {
        let rect = input.rect();
        match input.kind {
            CurveInputKind::Press(position) => self.press(function, rect, position),
            CurveInputKind::Move(position) => self.drag(function, rect, position),
            CurveInputKind::Release => self.release(),
        }
    }
}

static EMPTY_PATH: CurvePath = CurvePath {
    commands: Vec::new(),
    markers: Vec::new(),
};
