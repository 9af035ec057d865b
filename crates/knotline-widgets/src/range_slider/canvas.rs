//! Canvas Program for the range slider
//!
//! The program never mutates the slider: pointer events are published as
//! [`SliderInput`] messages and the application feeds them back into
//! [`RangeSlider::handle_input`] (or the double/editor equivalents).

use super::geometry::{LinearSliderGeometry, Orientation, SliderGeometry, SliderStyle};
use super::state::{Handle, PointerPress, RangeSlider, SliderInput, SliderInputKind};
use crate::theme::{
    GROOVE_BORDER_COLOR, GROOVE_COLOR, HANDLE_ACTIVE_COLOR, HANDLE_COLOR, RANGE_COLOR,
};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Point, Rectangle, Size, Theme};

/// Thickness of the drawn groove across the main axis
const GROOVE_THICKNESS: f32 = 4.0;

/// Canvas state for tracking slider mouse interaction
#[derive(Debug, Clone, Default)]
pub struct RangeSliderInteraction {
    /// Buttons currently held, for chord detection; each button at most once
    held_buttons: Vec<mouse::Button>,
    /// A left press inside the widget has not been released yet
    is_dragging: bool,
}

impl RangeSliderInteraction {
    /// Record a press and report whether another button was already down
    ///
    /// A second press of a button still marked as held means its release
    /// was lost, so the stale set is dropped.
    fn press(&mut self, button: mouse::Button) -> bool {
        if self.held_buttons.contains(&button) {
            log::debug!("RangeSliderCanvas: lost release of {:?}", button);
            self.held_buttons.clear();
        }
        let chord = !self.held_buttons.is_empty();
        self.held_buttons.push(button);
        chord
    }

    fn release(&mut self, button: mouse::Button) {
        self.held_buttons.retain(|held| *held != button);
    }
}

/// Canvas program drawing a [`RangeSlider`]
///
/// `on_input` is called with every pointer input relevant to the slider.
pub struct RangeSliderCanvas<'a, F> {
    pub slider: &'a RangeSlider,
    pub style: SliderStyle,
    pub on_input: F,
}

impl<'a, Message, F> Program<Message> for RangeSliderCanvas<'a, F>
where
    Message: Clone,
    F: Fn(SliderInput) -> Message,
{
    type State = RangeSliderInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let input = |kind| SliderInput {
            kind,
            bounds: bounds.size(),
        };

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let chord = interaction.press(*button);
                if *button != mouse::Button::Left {
                    return None;
                }
                if interaction.is_dragging {
                    // The previous left release never arrived: end that drag first
                    interaction.is_dragging = false;
                    return Some(canvas::Action::publish((self.on_input)(input(
                        SliderInputKind::Release,
                    ))));
                }
                let position = cursor.position_in(bounds)?;
                interaction.is_dragging = !chord;
                let press = PointerPress { position, chord };
                Some(canvas::Action::publish((self.on_input)(input(
                    SliderInputKind::Press(press),
                ))))
            }
            Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                interaction.release(*button);
                if *button != mouse::Button::Left || !interaction.is_dragging {
                    return None;
                }
                interaction.is_dragging = false;
                Some(canvas::Action::publish((self.on_input)(input(
                    SliderInputKind::Release,
                ))))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if !interaction.is_dragging {
                    return None;
                }
                // Widget-local even outside the bounds, for snap-back
                let local = Point::new(position.x - bounds.x, position.y - bounds.y);
                Some(canvas::Action::publish((self.on_input)(input(
                    SliderInputKind::Move(local),
                ))))
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                // Releases outside the window are not delivered
                interaction.held_buttons.clear();
                if !interaction.is_dragging {
                    return None;
                }
                interaction.is_dragging = false;
                Some(canvas::Action::publish((self.on_input)(input(
                    SliderInputKind::Release,
                ))))
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.is_dragging && self.slider.is_slider_down() {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let geometry = LinearSliderGeometry::from_size(bounds.size(), self.style);
        let over_handle = [Handle::Minimum, Handle::Maximum].into_iter().any(|handle| {
            geometry
                .handle_rect(self.slider.range(), self.slider.position(handle))
                .contains(position)
        });
        if over_handle {
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
        let geometry = LinearSliderGeometry::from_size(bounds.size(), self.style);

        // Groove
        let groove = across_main_axis(geometry.groove_rect(), self.style.orientation);
        frame.fill_rectangle(groove.position(), groove.size(), GROOVE_COLOR);
        frame.stroke(
            &Path::rectangle(groove.position(), groove.size()),
            Stroke::default()
                .with_color(GROOVE_BORDER_COLOR)
                .with_width(1.0),
        );

        // Selected range
        let selection = self.slider.selection_rect(&geometry);
        let selection = match self.style.orientation {
            Orientation::Horizontal => Rectangle {
                y: groove.y,
                height: groove.height,
                ..selection
            },
            Orientation::Vertical => Rectangle {
                x: groove.x,
                width: groove.width,
                ..selection
            },
        };
        frame.fill_rectangle(selection.position(), selection.size(), RANGE_COLOR);

        // Handles, the selected one last so it stays on top
        for handle in self.slider.paint_order() {
            let rect = geometry.handle_rect(self.slider.range(), self.slider.position(handle));
            let color = if self.slider.active_handle() == Some(handle) {
                HANDLE_ACTIVE_COLOR
            } else {
                HANDLE_COLOR
            };
            frame.fill_rectangle(rect.position(), rect.size(), color);
            frame.stroke(
                &Path::rectangle(rect.position(), rect.size()),
                Stroke::default()
                    .with_color(GROOVE_BORDER_COLOR)
                    .with_width(1.0),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Thin band through the middle of `rect` along the slider direction
fn across_main_axis(rect: Rectangle, orientation: Orientation) -> Rectangle {
    match orientation {
        Orientation::Horizontal => {
            let height = GROOVE_THICKNESS.min(rect.height);
            Rectangle::new(
                Point::new(rect.x, rect.center_y() - height / 2.0),
                Size::new(rect.width, height),
            )
        }
        Orientation::Vertical => {
            let width = GROOVE_THICKNESS.min(rect.width);
            Rectangle::new(
                Point::new(rect.center_x() - width / 2.0, rect.y),
                Size::new(width, rect.height),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groove_band_is_centered() {
        let rect = Rectangle::new(Point::ORIGIN, Size::new(100.0, 20.0));
        let band = across_main_axis(rect, Orientation::Horizontal);
        assert_eq!(band.y, 8.0);
        assert_eq!(band.height, GROOVE_THICKNESS);
        assert_eq!(band.width, 100.0);

        let rect = Rectangle::new(Point::ORIGIN, Size::new(20.0, 100.0));
        let band = across_main_axis(rect, Orientation::Vertical);
        assert_eq!(band.x, 8.0);
        assert_eq!(band.height, 100.0);
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(200.0, 20.0))
    }

    fn send(
        canvas: &RangeSliderCanvas<'_, fn(SliderInput) -> SliderInput>,
        interaction: &mut RangeSliderInteraction,
        event: mouse::Event,
    ) -> bool {
        let cursor = mouse::Cursor::Available(Point::new(3.0, 10.0));
        let event = Event::Mouse(event);
        Program::<SliderInput>::update(canvas, interaction, &event, bounds(), cursor).is_some()
    }

    fn echo(input: SliderInput) -> SliderInput {
        input
    }

    #[test]
    fn test_lost_release_does_not_leave_a_stuck_chord() {
        let slider = RangeSlider::new();
        let canvas = RangeSliderCanvas {
            slider: &slider,
            style: SliderStyle::default(),
            on_input: echo as fn(SliderInput) -> SliderInput,
        };
        let mut interaction = RangeSliderInteraction::default();
        let left = mouse::Button::Left;

        // Press whose release never arrives
        assert!(send(&canvas, &mut interaction, mouse::Event::ButtonPressed(left)));
        assert!(interaction.is_dragging);

        // The next press closes the stale drag
        assert!(send(&canvas, &mut interaction, mouse::Event::ButtonPressed(left)));
        assert!(!interaction.is_dragging);
        assert!(!send(&canvas, &mut interaction, mouse::Event::ButtonReleased(left)));
        assert!(interaction.held_buttons.is_empty());

        for _ in 0..3 {
            assert!(send(&canvas, &mut interaction, mouse::Event::ButtonPressed(left)));
            assert_eq!(interaction.held_buttons, vec![left]);
            assert!(interaction.is_dragging);
            assert!(send(&canvas, &mut interaction, mouse::Event::ButtonReleased(left)));
            assert!(interaction.held_buttons.is_empty());
        }
    }

    #[test]
    fn test_cursor_leaving_window_ends_drag_and_clears_buttons() {
        let slider = RangeSlider::new();
        let canvas = RangeSliderCanvas {
            slider: &slider,
            style: SliderStyle::default(),
            on_input: echo as fn(SliderInput) -> SliderInput,
        };
        let mut interaction = RangeSliderInteraction::default();

        send(&canvas, &mut interaction, mouse::Event::ButtonPressed(mouse::Button::Right));
        send(&canvas, &mut interaction, mouse::Event::ButtonPressed(mouse::Button::Left));
        assert!(!interaction.is_dragging, "left after right is a chord");

        assert!(!send(&canvas, &mut interaction, mouse::Event::CursorLeft));
        assert!(interaction.held_buttons.is_empty());

        send(&canvas, &mut interaction, mouse::Event::ButtonPressed(mouse::Button::Left));
        assert!(interaction.is_dragging);
        assert!(send(&canvas, &mut interaction, mouse::Event::CursorLeft));
        assert!(!interaction.is_dragging);
    }
}
