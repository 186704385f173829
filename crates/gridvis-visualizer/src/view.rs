//! View state and transform composition.
//!
//! The view transform is rebuilt from scratch on every paint:
//! ```text
//! native · center · flip · scale · pan
//! ```
//! Each step post-multiplies, so pan is expressed in pre-scale pixels and the
//! flip happens about the (possibly centered) origin.

use glam::{DAffine2, DVec2};
use gridvis_core::constants::{CENTER_POINT_SCALE, DEFAULT_SCALE_FACTOR, DEFAULT_UNIT_PX};
use gridvis_core::{Color, GridPoint, Size, YPreference};

/// Zoom, unit and pan of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Uniform zoom applied after unit conversion (1.0 = 100%)
    pub scale_factor: f64,
    /// Pixels per grid unit before scaling
    pub unit: i32,
    /// Accumulated pan translation, in pixels before scaling
    pub pan: DVec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            unit: DEFAULT_UNIT_PX,
            pan: DVec2::ZERO,
        }
    }
}

impl ViewState {
    /// Multiply the current scale factor.
    pub fn zoom(&mut self, multiplier: f64) {
        self.scale_factor *= multiplier;
    }

    /// Accumulate a pan that moves `point` towards the origin.
    pub fn center_on(&mut self, point: GridPoint) {
        self.pan += -point * CENTER_POINT_SCALE;
    }

    pub fn re_center(&mut self) {
        self.pan = DVec2::ZERO;
    }

    pub fn unit_scale(&self) -> f64 {
        f64::from(self.unit)
    }
}

/// Axis visibility and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisStyle {
    pub visible: bool,
    pub color: Color,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            visible: false,
            color: Color::BLACK,
        }
    }
}

/// Session preferences consumed by the paint routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPreferences {
    pub y_preference: YPreference,
    pub centered: bool,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            y_preference: YPreference::Up,
            centered: true,
        }
    }
}

/// Compose the full user-to-device transform for one paint.
pub fn compose_view_transform(
    native: DAffine2,
    surface: Size,
    prefs: ViewPreferences,
    view: &ViewState,
) -> DAffine2 {
    let mut t = native;
    if prefs.centered {
        t = t * DAffine2::from_translation(surface.half());
    }
    if prefs.y_preference.flips_y() {
        t = t * DAffine2::from_scale(DVec2::new(1.0, -1.0));
    }
    t = t * DAffine2::from_scale(DVec2::splat(view.scale_factor));
    t * DAffine2::from_translation(view.pan)
}
