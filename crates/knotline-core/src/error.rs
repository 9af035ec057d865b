//! Error types for transfer function editing and preset I/O

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by structural edits and preset files
///
/// Pointer-driven edits never fail: out-of-range positions clamp instead.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Control point index past the end of the sequence
    #[error("Control point index {index} out of bounds (function has {count} points)")]
    IndexOutOfRange { index: usize, count: usize },

    /// Non-linear control point without sub-points, or sub-points escaping the segment
    #[error("Invalid sub-points for control point at x={x}: {reason}")]
    InvalidSubPoints { x: f64, reason: String },

    /// Domain with min >= max, or a non-finite bound
    #[error("Invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    /// Preset file could not be read or written
    #[error("Preset I/O error for '{}': {source}", path.display())]
    PresetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preset file is not valid YAML for a transfer function
    #[error("Failed to parse preset '{}': {source}", path.display())]
    PresetParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, CurveError>;
