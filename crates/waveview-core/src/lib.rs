//! Waveview Core - shared model for the per-channel waveform display

pub mod clip;
pub mod config;
pub mod display;
pub mod selection;
pub mod types;

pub use clip::Clip;
pub use display::DisplayKind;
pub use selection::SelectedRegion;
pub use types::*;
