//! View functions for the transfer function renderers

use super::canvas::{CurveCanvas, GradientCanvas};
use super::control_points::{ControlPointsItem, CurveInput};
use super::gradient::GradientItem;
use iced::widget::Canvas;
use iced::{Element, Length};
use knotline_core::TransferFunction;

/// Gradient strip height
pub const GRADIENT_HEIGHT: f32 = 24.0;

/// Curve editor height
pub const CURVE_HEIGHT: f32 = 160.0;

/// Create a gradient strip for `function`
///
/// Display only; the strip never publishes messages.
pub fn transfer_function_gradient<'a, Message, F>(
    function: &'a F,
    item: &'a GradientItem,
) -> Element<'a, Message>
where
    Message: 'a,
    F: TransferFunction + ?Sized,
{
    Canvas::new(GradientCanvas { function, item })
        .width(Length::Fill)
        .height(Length::Fixed(GRADIENT_HEIGHT))
        .into()
}

/// Create a curve editor with draggable control point markers
///
/// # Example
///
/// ```ignore
/// let curve = transfer_function_curve(
///     &self.function,
///     &self.control_points,
///     Message::CurveInput,
/// );
/// ```
pub fn transfer_function_curve<'a, Message, F>(
    function: &'a F,
    item: &'a ControlPointsItem,
    on_input: impl Fn(CurveInput) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
    F: TransferFunction + ?Sized,
{
    Canvas::new(CurveCanvas {
        function,
        item,
        on_input,
    })
    .width(Length::Fill)
    .height(Length::Fixed(CURVE_HEIGHT))
    .into()
}
