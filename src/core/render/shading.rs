//=========================================================================
// Depth Shading
//=========================================================================
//
// Active cubes are tinted by their distance to the camera: brightest at
// `near`, darkest at `far`, linear in between.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::Color;

//=== DepthShader =========================================================

/// Maps camera distance to a brightness and applies it to a base colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthShader {
    near: f32,
    far: f32,
}

impl DepthShader {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Brightness in `[0, 1]` for a given camera distance.
    pub fn brightness(&self, distance: f32) -> f32 {
        // inverse lerp from far (0) to near (1)
        ((distance - self.far) / (self.near - self.far)).clamp(0.0, 1.0)
    }

    /// Base colour with its HSV value replaced by the depth brightness.
    pub fn shade(&self, base: Color, camera: Vec3, point: Vec3) -> Color {
        base.with_value(self.brightness(camera.distance(point)))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
