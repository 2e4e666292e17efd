//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunable parameters for the placement engine, gesture classifier and
// orbit camera. Defaults reproduce the shipped game.
//
// Usage:
// ```text
//   GameConfig::default()
//       .with_lattice(Lattice::new(0.1, 0.05))
//       .with_max_click_interval(0.4)
//       .validate()?
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{UVec2, Vec3};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Lattice;
use crate::core::render::Color;

//=== ConfigError =========================================================

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter must be strictly positive and finite.
    NotPositive { name: &'static str, value: f32 },

    /// Parameter must be finite.
    NotFinite { name: &'static str },

    /// Depth shading range is empty or inverted.
    EmptyShadingRange { near: f32, far: f32 },

    /// Viewport has a zero dimension.
    EmptyViewport,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            Self::NotFinite { name } => write!(f, "{} must be finite", name),
            Self::EmptyShadingRange { near, far } => {
                write!(f, "shading range is empty (near {}, far {})", near, far)
            }
            Self::EmptyViewport => write!(f, "viewport must be non-empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

//--- Validation Helpers --------------------------------------------------

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name })
    }
}

//=== CameraConfig ========================================================

/// Initial camera pose and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// World-space start position. The camera is aimed at the pivot.
    pub position: Vec3,

    /// Vertical field of view, degrees.
    pub fov_y_degrees: f32,

    /// Viewport size in physical pixels.
    pub viewport: UVec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov_y_degrees: 60.0,
            viewport: UVec2::new(800, 600),
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("camera position", self.position)?;
        positive("camera fov", self.fov_y_degrees)?;
        if self.fov_y_degrees >= 180.0 {
            return Err(ConfigError::NotPositive {
                name: "180 - camera fov",
                value: 180.0 - self.fov_y_degrees,
            });
        }
        if self.viewport.x == 0 || self.viewport.y == 0 {
            return Err(ConfigError::EmptyViewport);
        }
        Ok(())
    }
}

//=== GameConfig ==========================================================

/// Full set of game tunables.
///
/// # Default Values
///
/// - **Lattice**: increment 0.1, offset 0.05
/// - **Swipe threshold**: 50 px
/// - **Double-tap interval**: 0.5 s
/// - **Drag threshold**: 0.01 px
/// - **Orbit speed**: 120 °/s
/// - **Pivot**: origin
/// - **Spawn**: (0.05, 0.05, 0.05), scale 0.1
/// - **Depth shading**: brightest at 4.5, darkest at 5.5
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub lattice: Lattice,
    pub min_swipe_distance: f32,
    pub max_click_interval: f32,
    pub min_drag_distance: f32,
    pub orbit_degrees_per_second: f32,
    pub pivot: Vec3,
    pub spawn_position: Vec3,
    pub spawn_scale: f32,
    pub locked_color: Color,
    pub shade_near: f32,
    pub shade_far: f32,
    pub contact_tolerance: f32,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lattice: Lattice::default(),
            min_swipe_distance: 50.0,
            max_click_interval: 0.5,
            min_drag_distance: 0.01,
            orbit_degrees_per_second: 120.0,
            pivot: Vec3::ZERO,
            spawn_position: Vec3::splat(0.05),
            spawn_scale: 0.1,
            locked_color: Color::GREEN,
            shade_near: 4.5,
            shade_far: 5.5,
            contact_tolerance: 1e-4,
            camera: CameraConfig::default(),
        }
    }
}

impl GameConfig {
    //--- Fluent Setters ---------------------------------------------------

    pub fn with_lattice(mut self, lattice: Lattice) -> Self {
        self.lattice = lattice;
        self
    }

    pub fn with_min_swipe_distance(mut self, pixels: f32) -> Self {
        self.min_swipe_distance = pixels;
        self
    }

    pub fn with_max_click_interval(mut self, seconds: f32) -> Self {
        self.max_click_interval = seconds;
        self
    }

    pub fn with_min_drag_distance(mut self, pixels: f32) -> Self {
        self.min_drag_distance = pixels;
        self
    }

    pub fn with_orbit_speed(mut self, degrees_per_second: f32) -> Self {
        self.orbit_degrees_per_second = degrees_per_second;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_spawn(mut self, position: Vec3, scale: f32) -> Self {
        self.spawn_position = position;
        self.spawn_scale = scale;
        self
    }

    pub fn with_locked_color(mut self, color: Color) -> Self {
        self.locked_color = color;
        self
    }

    pub fn with_depth_shading(mut self, near: f32, far: f32) -> Self {
        self.shade_near = near;
        self.shade_far = far;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    //--- Validation -------------------------------------------------------

    /// Checks every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("lattice increment", self.lattice.increment())?;
        if !self.lattice.offset().is_finite() {
            return Err(ConfigError::NotFinite { name: "lattice offset" });
        }
        positive("min swipe distance", self.min_swipe_distance)?;
        positive("max click interval", self.max_click_interval)?;
        positive("min drag distance", self.min_drag_distance)?;
        positive("orbit speed", self.orbit_degrees_per_second)?;
        positive("spawn scale", self.spawn_scale)?;
        finite("pivot", self.pivot)?;
        finite("spawn position", self.spawn_position)?;

        if !self.contact_tolerance.is_finite() || self.contact_tolerance < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "contact tolerance",
                value: self.contact_tolerance,
            });
        }

        if !(self.shade_near.is_finite() && self.shade_far.is_finite())
            || self.shade_far <= self.shade_near
        {
            return Err(ConfigError::EmptyShadingRange {
                near: self.shade_near,
                far: self.shade_far,
            });
        }

        self.camera.validate()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_shipped_game() {
        let config = GameConfig::default();
        assert_eq!(config.lattice, Lattice::new(0.1, 0.05));
        assert_eq!(config.min_swipe_distance, 50.0);
        assert_eq!(config.max_click_interval, 0.5);
        assert_eq!(config.orbit_degrees_per_second, 120.0);
        assert_eq!(config.spawn_position, Vec3::splat(0.05));
        assert_eq!(config.spawn_scale, 0.1);
    }

    #[test]
    fn zero_increment_rejected() {
        let config = GameConfig::default().with_lattice(Lattice::new(0.0, 0.05));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "lattice increment", .. })
        ));
    }

    #[test]
    fn negative_orbit_speed_rejected() {
        let config = GameConfig::default().with_orbit_speed(-10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_click_interval_rejected() {
        let config = GameConfig::default().with_max_click_interval(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_shading_range_rejected() {
        let config = GameConfig::default().with_depth_shading(5.5, 4.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyShadingRange { near: 5.5, far: 4.5 })
        );
    }

    #[test]
    fn empty_viewport_rejected() {
        let camera = CameraConfig {
            viewport: UVec2::new(0, 600),
            ..CameraConfig::default()
        };
        let config = GameConfig::default().with_camera(camera);
        assert_eq!(config.validate(), Err(ConfigError::EmptyViewport));
    }

    #[test]
    fn error_display_names_parameter() {
        let err = ConfigError::NotPositive { name: "orbit speed", value: -1.0 };
        assert_eq!(err.to_string(), "orbit speed must be positive, got -1");
    }
}
