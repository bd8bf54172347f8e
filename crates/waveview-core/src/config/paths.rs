//! Path utilities for waveview configuration files

use std::path::PathBuf;

/// Standard directory for waveview configuration
///
/// Returns: `<user config dir>/waveview` (e.g. `~/.config/waveview`)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("waveview")
}

/// Standard path for a named configuration file
///
/// # Arguments
/// * `filename` - Config file name (e.g., "display.yaml")
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}
