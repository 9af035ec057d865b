//! Canvas Program implementations for the transfer function renderers
//!
//! Both programs replay the display lists built by [`GradientItem`] and
//! [`ControlPointsItem`]; neither mutates the data source.

use super::control_points::{ControlPointsItem, CurveInput, CurveInputKind};
use super::gradient::GradientItem;
use super::scene::{GradientFill, PathCommand};
use crate::theme::{CURVE_BACKGROUND, CURVE_COLOR, MARKER_ACTIVE_COLOR, MARKER_COLOR};
use iced::widget::canvas::{
    self, gradient, Event, Frame, Geometry, Gradient, Path, Program, Stroke,
};
use iced::{mouse, Point, Rectangle, Theme};
use knotline_core::TransferFunction;

// =============================================================================
// Gradient Canvas Program
// =============================================================================

/// Canvas program drawing the gradient strip (display only)
pub struct GradientCanvas<'a, F: ?Sized> {
    pub function: &'a F,
    pub item: &'a GradientItem,
}

impl<'a, Message, F> Program<Message> for GradientCanvas<'a, F>
where
    F: TransferFunction + ?Sized,
{
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let rect = Rectangle::new(Point::ORIGIN, bounds.size());

        for fill in self.item.fills(self.function, rect).iter() {
            match *fill {
                GradientFill::Solid { rect, color } => {
                    frame.fill_rectangle(rect.position(), rect.size(), color);
                }
                GradientFill::Linear {
                    rect,
                    start_x,
                    end_x,
                    from,
                    to,
                } => {
                    let linear = gradient::Linear::new(
                        Point::new(start_x, rect.y),
                        Point::new(end_x, rect.y),
                    )
                    .add_stop(0.0, from)
                    .add_stop(1.0, to);
                    frame.fill_rectangle(rect.position(), rect.size(), Gradient::Linear(linear));
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

// =============================================================================
// Curve Canvas Program
// =============================================================================

/// Canvas state for tracking marker drags
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveInteraction {
    /// A left press inside the canvas has not been released yet
    pub is_dragging: bool,
}

/// Canvas program drawing the curve and its control point markers
///
/// `on_input` receives presses inside the canvas, moves while pressed and
/// the matching release.
pub struct CurveCanvas<'a, F, I>
where
    F: ?Sized,
{
    pub function: &'a F,
    pub item: &'a ControlPointsItem,
    pub on_input: I,
}

impl<'a, Message, F, I> Program<Message> for CurveCanvas<'a, F, I>
where
    Message: Clone,
    F: TransferFunction + ?Sized,
    I: Fn(CurveInput) -> Message,
{
    type State = CurveInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let input = |kind| CurveInput {
            kind,
            bounds: bounds.size(),
        };

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                interaction.is_dragging = true;
                Some(canvas::Action::publish((self.on_input)(input(
                    CurveInputKind::Press(position),
                ))))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if !interaction.is_dragging {
                    return None;
                }
                interaction.is_dragging = false;
                Some(canvas::Action::publish((self.on_input)(input(
                    CurveInputKind::Release,
                ))))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if !interaction.is_dragging || self.item.selected().is_none() {
                    return None;
                }
                let local = Point::new(position.x - bounds.x, position.y - bounds.y);
                Some(canvas::Action::publish((self.on_input)(input(
                    CurveInputKind::Move(local),
                ))))
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.item.selected().is_some() {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let rect = Rectangle::new(Point::ORIGIN, bounds.size());
        if self.item.marker_at(self.function, rect, position).is_some() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), CURVE_BACKGROUND);

        let rect = Rectangle::new(Point::ORIGIN, bounds.size());
        let path = self.item.path(self.function, rect);
        if path.is_empty() {
            return vec![frame.into_geometry()];
        }

        let curve = Path::new(|builder| {
            for command in &path.commands {
                match *command {
                    PathCommand::MoveTo(p) => builder.move_to(p),
                    PathCommand::LineTo(p) => builder.line_to(p),
                    PathCommand::CubicTo { c1, c2, to } => builder.bezier_curve_to(c1, c2, to),
                }
            }
        });
        frame.stroke(
            &curve,
            Stroke::default().with_color(CURVE_COLOR).with_width(1.0),
        );

        let radius = self.item.point_size();
        for (index, marker) in path.markers.iter().enumerate() {
            let color = if self.item.selected() == Some(index) {
                MARKER_ACTIVE_COLOR
            } else {
                MARKER_COLOR
            };
            let circle = Path::circle(*marker, radius);
            frame.fill(&circle, color);
            frame.stroke(
                &circle,
                Stroke::default().with_color(CURVE_COLOR).with_width(1.0),
            );
        }

        vec![frame.into_geometry()]
    }
}
