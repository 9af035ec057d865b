//! YAML presets for transfer functions
//!
//! A preset is the serializable snapshot of a [`PiecewiseFunction`]: domain,
//! value range and control points. Observers are not part of a preset.

use super::{ControlPoint, PiecewiseFunction, PointValue, TransferFunction};
use crate::error::{CurveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable form of a transfer function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunctionPreset {
    pub name: String,
    pub domain: (f64, f64),
    pub min_value: PointValue,
    pub max_value: PointValue,
    #[serde(default)]
    pub points: Vec<ControlPoint>,
}

impl TransferFunctionPreset {
    /// Snapshot a function under a display name
    pub fn from_function(name: impl Into<String>, function: &PiecewiseFunction) -> Self {
        Self {
            name: name.into(),
            domain: function.range(),
            min_value: function.min_value(),
            max_value: function.max_value(),
            points: function.points().to_vec(),
        }
    }

    /// Rebuild the function, validating the stored points
    pub fn to_function(&self) -> Result<PiecewiseFunction> {
        PiecewiseFunction::from_points(
            self.domain,
            self.min_value,
            self.max_value,
            self.points.clone(),
        )
    }
}

/// Read a preset file
pub fn load_preset(path: &Path) -> Result<TransferFunctionPreset> {
    log::info!("load_preset: Loading from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|source| CurveError::PresetIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| CurveError::PresetParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a preset file, creating parent directories
pub fn save_preset(preset: &TransferFunctionPreset, path: &Path) -> Result<()> {
    log::info!("save_preset: Saving '{}' to {:?}", preset.name, path);
    let io_err = |source| CurveError::PresetIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let yaml = serde_yaml::to_string(preset).map_err(|source| CurveError::PresetParse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, yaml).map_err(io_err)
}
