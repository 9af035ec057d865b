//! Range slider and transfer function widgets
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State structs**: pure data + interaction logic ([`RangeSlider`],
//!   [`DoubleRangeSlider`], [`RangeEditor`], [`ControlPointsItem`], [`GradientItem`]).
//!   Every mutation returns the events it produced, so the owning
//!   application decides what to do with them.
//! - **View functions**: take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: translate pointer events into input messages and draw
//!   the display lists produced by the state structs
//!
//! ## Widgets
//!
//! - `range_slider`: dual-handle integer slider with tracking and snap-back
//! - `range_editor`: `f64` range slider flanked by formatted value labels
//! - `transfer_function_gradient`: gradient strip for a transfer function
//! - `transfer_function_curve`: stroked curve with draggable control points

pub mod range_slider;
pub mod theme;
pub mod transfer_function;

pub use range_slider::{
    range_editor, range_slider, DoubleRangeSlider, Handle, LinearSliderGeometry, Orientation,
    PointerPress, RangeEditor, RangeEditorEvent, RangeSlider, RangeSliderCanvas, RangeSliderEvent,
    RangeSliderInteraction, SliderGeometry, SliderInput, SliderInputKind, SliderStyle,
    RANGE_SLIDER_HEIGHT,
};

pub use transfer_function::{
    curve_path, gradient_fills, transfer_function_curve, transfer_function_gradient,
    ControlPointsItem, CurveCanvas, CurveEvent, CurveInput, CurveInputKind, CurveInteraction,
    CurvePath, DomainMapping, GradientCanvas, GradientFill, GradientItem, PathCommand,
};
