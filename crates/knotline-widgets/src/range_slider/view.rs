//! View functions for the range slider widgets

use super::canvas::RangeSliderCanvas;
use super::editor::RangeEditor;
use super::geometry::{Orientation, SliderStyle};
use super::state::{RangeSlider, SliderInput};
use iced::widget::{container, row, text, Canvas};
use iced::{Alignment, Color, Element, Length};

/// Slider thickness across its main axis
pub const RANGE_SLIDER_HEIGHT: f32 = 20.0;

/// Width reserved for each value label of the range editor
const LABEL_WIDTH: f32 = 72.0;

const LABEL_COLOR: Color = Color::from_rgb(0.85, 0.85, 0.85);

/// Create a range slider element
///
/// # Example
///
/// ```ignore
/// let slider = range_slider(
///     &self.slider,
///     SliderStyle::default(),
///     Message::SliderInput,
/// );
/// ```
pub fn range_slider<'a, Message>(
    slider: &'a RangeSlider,
    style: SliderStyle,
    on_input: impl Fn(SliderInput) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let canvas = Canvas::new(RangeSliderCanvas {
        slider,
        style,
        on_input,
    });
    match style.orientation {
        Orientation::Horizontal => canvas
            .width(Length::Fill)
            .height(Length::Fixed(RANGE_SLIDER_HEIGHT))
            .into(),
        Orientation::Vertical => canvas
            .width(Length::Fixed(RANGE_SLIDER_HEIGHT))
            .height(Length::Fill)
            .into(),
    }
}

/// Range editor: the slider flanked by the formatted minimum and maximum
///
/// Labels show the live values so they follow an untracked drag.
pub fn range_editor<'a, Message>(
    editor: &'a RangeEditor,
    style: SliderStyle,
    on_input: impl Fn(SliderInput) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let (lo, hi) = editor.live_values();
    let label = |value: f64| {
        container(text(editor.format_value(value)).size(12).color(LABEL_COLOR))
            .width(Length::Fixed(LABEL_WIDTH))
            .center_x(Length::Fixed(LABEL_WIDTH))
    };

    let style = SliderStyle {
        orientation: Orientation::Horizontal,
        ..style
    };

    row![
        label(lo),
        range_slider(editor.int_slider(), style, on_input),
        label(hi),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
