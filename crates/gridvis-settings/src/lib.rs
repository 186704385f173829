//! gridvis Settings Crate
//!
//! Loads, validates and saves the configuration file that seeds a session and
//! its grid.

pub mod config;
pub mod error;

pub use config::{AxesSettings, Config, GridSettings, WindowSettings, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
