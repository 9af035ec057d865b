//! Dual-handle range slider
//!
//! Layers, bottom-up:
//!
//! - [`RangeSlider`]: integer values/positions, hit-testing and drag logic
//! - [`DoubleRangeSlider`]: `f64` values quantized by a single step
//! - [`RangeEditor`]: change/commit notifications and value formatting
//!
//! All three consume [`SliderInput`] published by [`RangeSliderCanvas`].

mod canvas;
mod double;
mod editor;
mod geometry;
mod state;
mod view;

pub use canvas::{RangeSliderCanvas, RangeSliderInteraction};
pub use double::DoubleRangeSlider;
pub use editor::{RangeEditor, RangeEditorEvent};
pub use geometry::{
    position_from_value, value_from_position, LinearSliderGeometry, Orientation, SliderGeometry,
    SliderStyle,
};
pub use state::{
    Handle, PointerPress, RangeSlider, RangeSliderEvent, SliderInput, SliderInputKind,
};
pub use view::{range_editor, range_slider, RANGE_SLIDER_HEIGHT};
