//! Configuration for the channel display
//!
//! Provides the persisted display-selection state plus the generic YAML
//! loading/saving infrastructure it rides on:
//!
//! - [`DisplayConfig`] - which display kinds a channel shows by default
//! - [`load_config`] / [`save_config`] - generic YAML round trip
//! - [`default_config_path`] - standard location under the user config dir

mod display;
mod io;
mod paths;

pub use display::DisplayConfig;
pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path};
