//! Configuration file for gridvis
//!
//! Supports JSON and TOML, chosen by file extension, stored by default in the
//! platform config directory. Configuration is organized into sections:
//! - Window settings (size, Y orientation, centering)
//! - Grid settings (scale, unit, colors)
//! - Axes settings

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use gridvis_core::constants::{
    DEFAULT_SCALE_FACTOR, DEFAULT_UNIT_PX, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use gridvis_core::{Color, YPreference};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name used under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const APP_DIR_NAME: &str = "gridvis";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Content width in pixels
    pub width: u32,
    /// Content height in pixels
    pub height: u32,
    /// Whether increasing Y moves up or down on screen
    pub y_axis: YPreference,
    /// Put the grid origin at the window center
    pub centered: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            y_axis: YPreference::Up,
            centered: true,
        }
    }
}

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub scale_factor: f64,
    /// Pixels per grid unit before scaling
    pub unit: i32,
    pub default_object_color: Color,
    pub background_color: Color,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            unit: DEFAULT_UNIT_PX,
            default_object_color: Color::DARK_GRAY,
            background_color: Color::PANEL_BACKGROUND,
        }
    }
}

/// Axes settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesSettings {
    pub visible: bool,
    pub color: Color,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self {
            visible: false,
            color: Color::BLACK,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowSettings,
    pub grid: GridSettings,
    pub axes: AxesSettings,
}

impl Config {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/gridvis/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load configuration from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.width == 0 {
            return Err(ConfigError::out_of_range("window.width", self.window.width));
        }
        if self.window.height == 0 {
            return Err(ConfigError::out_of_range(
                "window.height",
                self.window.height,
            ));
        }
        if !(self.grid.scale_factor.is_finite() && self.grid.scale_factor > 0.0) {
            return Err(ConfigError::out_of_range(
                "grid.scale_factor",
                self.grid.scale_factor,
            ));
        }
        if self.grid.unit <= 0 {
            return Err(ConfigError::out_of_range("grid.unit", self.grid.unit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_session_defaults() {
        let config = Config::new();
        assert_eq!(config.window.width, 730);
        assert_eq!(config.window.height, 470);
        assert_eq!(config.window.y_axis, YPreference::Up);
        assert!(config.window.centered);
        assert_eq!(config.grid.scale_factor, 1.0);
        assert_eq!(config.grid.unit, 10);
        assert!(!config.axes.visible);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window.y_axis = YPreference::Down;
        config.grid.unit = 25;
        config.axes.visible = true;
        config.axes.color = Color::RED;
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.grid.scale_factor = 2.5;
        config.grid.background_color = Color::WHITE;
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[grid]\nunit = 5\ndefault_object_color = \"#ff8000\"\n\n[axes]\nvisible = true\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.grid.unit, 5);
        assert_eq!(config.grid.default_object_color, Color::from_rgb(255, 128, 0));
        assert_eq!(config.grid.scale_factor, 1.0);
        assert!(config.axes.visible);
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.grid.unit = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::out_of_range("grid.unit", 0))
        );

        let mut config = Config::default();
        config.grid.scale_factor = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\nwidth = 0\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Config(_)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"axes": {"color": "red"}}"#).unwrap();

        assert!(matches!(
            Config::load_from_file(&path),
            Err(SettingsError::JsonError(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let err = Config::default().save_to_file(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("gridvis/config.toml"));
        }
    }
}
