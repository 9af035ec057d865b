//! Configuration for knotline widgets and applications
//!
//! - Generic YAML config loading/saving
//! - Standard config and preset paths
//! - [`WidgetConfig`]: the plain numeric knobs the widgets read
//!
//! # Usage
//!
//! ```ignore
//! use knotline_core::config::{load_config, save_config, default_config_path, WidgetConfig};
//!
//! let path = default_config_path("widgets.yaml");
//! let config: WidgetConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;
mod widget;

pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path, default_preset_dir};
pub use widget::{RangeConfig, WidgetConfig};
