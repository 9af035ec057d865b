//! Gradient strip renderer
//!
//! Walks consecutive control point pairs and emits one left-to-right linear
//! gradient per segment (per sub-segment for non-linear points). The first
//! band reaches the strip's left edge and the last band its right edge.

use super::mapping::DomainMapping;
use super::scene::GradientFill;
use crate::theme::to_color;
use iced::{Color, Rectangle};
use knotline_core::{ControlPointKind, PointValue, Rgba, TransferFunction};
use std::cell::{Ref, RefCell};

/// Build the gradient bands for `function` inside `rect`
///
/// An empty function fills `rect` with `fallback`; a single point draws nothing.
pub fn gradient_fills<F>(function: &F, rect: Rectangle, fallback: Rgba) -> Vec<GradientFill>
where
    F: TransferFunction + ?Sized,
{
    let count = function.count();
    if count == 0 {
        return vec![GradientFill::Solid {
            rect,
            color: to_color(fallback),
        }];
    }

    let mapping = DomainMapping::for_function(function, rect);
    let Some(mut start_cp) = function.control_point(0) else {
        return Vec::new();
    };

    let mut fills = Vec::new();
    let mut start = mapping.map_x(start_cp.x);
    for i in 1..count {
        let Some(end_cp) = function.control_point(i) else {
            break;
        };
        let last_segment = i == count - 1;

        if let ControlPointKind::NonLinear { .. } = start_cp.kind {
            let points = start_cp.segment_points(&end_cp);
            for j in 1..points.len() {
                let end = mapping.map_x(points[j].x);
                fills.push(band(
                    rect,
                    (start, end),
                    value_color(&mapping, points[j - 1].value),
                    value_color(&mapping, points[j].value),
                    i == 1 && j == 1,
                    last_segment && j == points.len() - 1,
                ));
                start = end;
            }
        } else {
            let end = mapping.map_x(end_cp.x);
            fills.push(band(
                rect,
                (start, end),
                value_color(&mapping, start_cp.value),
                value_color(&mapping, end_cp.value),
                i == 1,
                last_segment,
            ));
            start = end;
        }
        start_cp = end_cp;
    }
    fills
}

fn band(
    rect: Rectangle,
    (start, end): (f32, f32),
    from: Color,
    to: Color,
    first: bool,
    last: bool,
) -> GradientFill {
    let left = if first { rect.x } else { start };
    let right = if last { rect.x + rect.width } else { end };
    GradientFill::Linear {
        rect: Rectangle {
            x: left,
            y: rect.y,
            width: right - left,
            height: rect.height,
        },
        start_x: start,
        end_x: end,
        from,
        to,
    }
}

/// Colors render as-is; scalars become white with alpha = normalized value
fn value_color(mapping: &DomainMapping, value: PointValue) -> Color {
    match value {
        PointValue::Color(c) => to_color(c),
        PointValue::Scalar(v) => to_color(Rgba::WHITE.with_alpha(mapping.normalize_y(v))),
    }
}

#[derive(Debug, Clone)]
struct CachedFills {
    source_id: u64,
    revision: u64,
    rect: Rectangle,
    fills: Vec<GradientFill>,
}

/// Gradient strip renderer with a cache keyed on source, revision and rectangle
#[derive(Debug, Clone, Default)]
pub struct GradientItem {
    fallback: Rgba,
    cache: RefCell<Option<CachedFills>>,
}

impl GradientItem {
    pub fn new(fallback: Rgba) -> Self {
        Self {
            fallback,
            cache: RefCell::new(None),
        }
    }

    pub fn fallback(&self) -> Rgba {
        self.fallback
    }

    pub fn set_fallback(&mut self, fallback: Rgba) {
        if self.fallback != fallback {
            self.fallback = fallback;
            self.invalidate();
        }
    }

    /// Drop the cached bands
    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }

    /// Bands for `function` in `rect`, recomputed only when either changed
    pub fn fills<F>(&self, function: &F, rect: Rectangle) -> Ref<'_, [GradientFill]>
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
            *self.cache.borrow_mut() = Some(CachedFills {
                source_id,
                revision,
                rect,
                fills: gradient_fills(function, rect, self.fallback),
            });
        }
        Ref::map(self.cache.borrow(), |cached| {
            cached.as_ref().map_or(&[][..], |c| c.fills.as_slice())
        })
    }
}
