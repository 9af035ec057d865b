//! Knotline Core - data model shared by the knotline widgets
//!
//! Nothing in this crate depends on a GUI toolkit. It provides:
//!
//! - **Colors**: [`Rgba`], the color type carried by transfer function values
//! - **Transfer functions**: control points, the [`TransferFunction`] data source
//!   trait and the in-memory [`PiecewiseFunction`]
//! - **Observers**: [`Notifier`], a small callback registry replacing signal/slot wiring
//! - **Config**: YAML loading/saving and the [`WidgetConfig`] knobs

pub mod color;
pub mod config;
pub mod error;
pub mod observer;
pub mod transfer_function;

pub use color::Rgba;
pub use config::WidgetConfig;
pub use error::CurveError;
pub use observer::{Notifier, SubscriptionId};
pub use transfer_function::{
    ControlPoint, ControlPointKind, PiecewiseFunction, PointValue, SubPoint, TransferFunction,
    TransferFunctionEvent,
};
