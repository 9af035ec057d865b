//! Standard locations for knotline configuration files

use std::path::PathBuf;

/// Base configuration directory
///
/// Returns: `{config_dir}/knotline` (e.g. `~/.config/knotline` on Linux),
/// falling back to `./knotline` when the platform has no config dir.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("knotline")
}

/// Config file path for a given file name
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

/// Directory holding transfer function presets
pub fn default_preset_dir() -> PathBuf {
    default_config_dir().join("presets")
}
