//! Transfer function renderers
//!
//! Two views over the same [`TransferFunction`](knotline_core::TransferFunction):
//!
//! - [`GradientItem`]: a horizontal gradient strip of the point values
//! - [`ControlPointsItem`]: the stroked curve with one draggable marker per
//!   control point
//!
//! Both build plain display lists ([`GradientFill`], [`CurvePath`]) cached on
//! the data source identity, its revision and the target rectangle.

mod canvas;
mod control_points;
mod gradient;
mod mapping;
mod scene;
mod view;

pub use canvas::{CurveCanvas, CurveInteraction, GradientCanvas};
pub use control_points::{curve_path, ControlPointsItem, CurveEvent, CurveInput, CurveInputKind};
pub use gradient::{gradient_fills, GradientItem};
pub use mapping::DomainMapping;
pub use scene::{CurvePath, GradientFill, PathCommand};
pub use view::{transfer_function_curve, transfer_function_gradient, CURVE_HEIGHT, GRADIENT_HEIGHT};
