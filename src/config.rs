//! Customizer configuration
//!
//! Tunables for the camera rig, breakpoints, decal limits and the color
//! panel. Stored as RON next to the other runtime assets; every field has a
//! default so a partial file only overrides what it names.

use macroquad::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{BaseColor, DecalLimits};

/// Where the app looks for its config (relative to the asset root)
pub const CONFIG_PATH: &str = "assets/config/customizer.ron";

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    /// Parsed fine but a value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Camera position for each view/breakpoint combination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraTargets {
    pub intro_mobile: [f32; 3],
    pub intro_tablet: [f32; 3],
    pub intro_desktop: [f32; 3],
    pub editing_mobile: [f32; 3],
    pub editing_desktop: [f32; 3],
}

impl Default for CameraTargets {
    fn default() -> Self {
        Self {
            intro_mobile: [0.0, 0.2, 2.5],
            intro_tablet: [0.0, 0.0, 2.5],
            intro_desktop: [-0.4, 0.0, 2.0],
            editing_mobile: [0.0, 0.0, 2.5],
            editing_desktop: [0.0, 0.0, 2.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Pointer pixels per radian of yaw
    pub drag_divisor: f32,
    /// Damping time constant in seconds
    pub smooth_time: f32,
    pub fov_degrees: f32,
    /// Turntable speed in preview mode (rad/s)
    pub preview_spin_speed: f32,
    pub targets: CameraTargets,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            drag_divisor: 100.0,
            smooth_time: 0.25,
            fov_degrees: 25.0,
            preview_spin_speed: 0.6,
            targets: CameraTargets::default(),
        }
    }
}

/// Viewport widths (logical pixels, inclusive upper bounds)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BreakpointConfig {
    pub mobile_max_width: f32,
    pub tablet_max_width: f32,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: 767.0,
            tablet_max_width: 1260.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecalConfig {
    /// Decal size at gizmo scale 1.0
    pub base_scale: f32,
    pub chest_scale_min: f32,
    pub chest_scale_max: f32,
    /// Scale change per wheel notch
    pub wheel_step: f32,
    pub chest_bounds_min: [f32; 2],
    pub chest_bounds_max: [f32; 2],
    pub rotation_snap_degrees: f32,
}

impl Default for DecalConfig {
    fn default() -> Self {
        let limits = DecalLimits::default();
        Self {
            base_scale: limits.base_scale,
            chest_scale_min: limits.chest_scale_min,
            chest_scale_max: limits.chest_scale_max,
            wheel_step: 0.01,
            chest_bounds_min: limits.chest_bounds_min.to_array(),
            chest_bounds_max: limits.chest_bounds_max.to_array(),
            rotation_snap_degrees: 15.0,
        }
    }
}

impl DecalConfig {
    pub fn limits(&self) -> DecalLimits {
        DecalLimits {
            base_scale: self.base_scale,
            chest_scale_min: self.chest_scale_min,
            chest_scale_max: self.chest_scale_max,
            chest_bounds_min: Vec2::from_array(self.chest_bounds_min),
            chest_bounds_max: Vec2::from_array(self.chest_bounds_max),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    pub default_color: String,
    pub swatches: Vec<String>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            default_color: "#EFBD4E".to_string(),
            swatches: [
                "#CCCCCC", "#EFBD4E", "#80C670", "#726DE8", "#353934", "#2CCCE4",
                "#FF8A65", "#7098DA", "#C19277", "#FF96AD", "#512314", "#5F123D",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl AppearanceConfig {
    pub fn default_color(&self) -> BaseColor {
        BaseColor::from_hex(&self.default_color).unwrap_or_default()
    }

    /// Parsed swatches; unparseable entries are skipped
    pub fn swatch_colors(&self) -> Vec<BaseColor> {
        self.swatches.iter().filter_map(|s| BaseColor::from_hex(s)).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CustomizerConfig {
    pub camera: CameraConfig,
    pub breakpoints: BreakpointConfig,
    pub decals: DecalConfig,
    pub appearance: AppearanceConfig,
}

impl CustomizerConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: CustomizerConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let cam = &self.camera;
        let decals = &self.decals;

        if !(cam.drag_divisor > 0.0) {
            return invalid("camera.drag_divisor must be positive");
        }
        if !(cam.smooth_time > 0.0) {
            return invalid("camera.smooth_time must be positive");
        }
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return invalid("camera.fov_degrees must be in (0, 180)");
        }
        if !(self.breakpoints.mobile_max_width < self.breakpoints.tablet_max_width) {
            return invalid("breakpoints must be strictly increasing");
        }
        if !(decals.base_scale > 0.0) {
            return invalid("decals.base_scale must be positive");
        }
        if !(decals.chest_scale_min > 0.0 && decals.chest_scale_min <= decals.chest_scale_max) {
            return invalid("decals.chest_scale_min must be positive and <= chest_scale_max");
        }
        if !(decals.wheel_step > 0.0) {
            return invalid("decals.wheel_step must be positive");
        }
        let (lo, hi) = (decals.chest_bounds_min, decals.chest_bounds_max);
        if !(lo[0] <= hi[0] && lo[1] <= hi[1]) {
            return invalid("decals.chest_bounds_min must not exceed chest_bounds_max");
        }
        Ok(())
    }
}

/// Convert a config triple into a vector
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}
