//=========================================================================
// Camera View
//=========================================================================
//
// Pose (position + rotation) and a symmetric perspective projection.
//
// Conventions (right-handed):
// - the camera looks down its local -Z, local +Y is up
// - screen pixels have their origin at the top-left, +y pointing down
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat3, Quat, UVec2, Vec2, Vec3};

//=== Internal Dependencies ===============================================

use crate::core::config::CameraConfig;
use crate::core::geometry::Ray;

//=== Camera ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    rotation: Quat,
    fov_y: f32,
    viewport: UVec2,
}

impl Camera {
    //--- Construction -----------------------------------------------------

    /// Camera at `position` with identity rotation (looking down -Z).
    pub fn new(position: Vec3, fov_y_degrees: f32, viewport: UVec2) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            viewport,
        }
    }

    /// Camera placed per `config` and aimed at `target` with world +Y up.
    pub fn from_config(config: &CameraConfig, target: Vec3) -> Self {
        let mut camera = Self::new(config.position, config.fov_y_degrees, config.viewport);
        camera.look_at(target, Vec3::Y);
        camera
    }

    //--- Pose -------------------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation.normalize();
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotates the camera to face `target`, keeping `up` as close to its
    /// local +Y as possible.
    ///
    /// Leaves the rotation unchanged if `target` coincides with the
    /// position or lies along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let Some(right) = forward.cross(up).try_normalize() else {
            return;
        };
        let up = right.cross(forward);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    //--- Projection -------------------------------------------------------

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Updates the viewport after a window resize. Zero-sized viewports
    /// (minimised windows) are ignored.
    pub fn set_viewport(&mut self, viewport: UVec2) {
        if viewport.x > 0 && viewport.y > 0 {
            self.viewport = viewport;
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    fn aspect(&self) -> f32 {
        self.viewport.x as f32 / self.viewport.y as f32
    }

    /// World-space ray from the camera through a pixel.
    pub fn screen_point_to_ray(&self, pixel: Vec2) -> Ray {
        let size = self.viewport.as_vec2();
        let ndc_x = 2.0 * pixel.x / size.x - 1.0;
        let ndc_y = 1.0 - 2.0 * pixel.y / size.y;
        let half_height = (self.fov_y * 0.5).tan();

        let local = Vec3::new(ndc_x * half_height * self.aspect(), ndc_y * half_height, -1.0);
        Ray::new(self.position, self.rotation * local)
    }

    /// Pixel a world point projects to, or `None` if it is behind the
    /// camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.rotation.inverse() * (point - self.position);
        if local.z >= 0.0 {
            return None;
        }

        let half_height = (self.fov_y * 0.5).tan();
        let ndc_x = local.x / (-local.z * half_height * self.aspect());
        let ndc_y = local.y / (-local.z * half_height);

        let size = self.viewport.as_vec2();
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * size.x,
            (1.0 - ndc_y) * 0.5 * size.y,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Vec3::ZERO)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        Camera::from_config(&CameraConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn default_camera_faces_origin() {
        let cam = camera();
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(cam.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn look_at_from_side() {
        let mut cam = Camera::new(Vec3::new(5.0, 0.0, 0.0), 60.0, UVec2::new(800, 600));
        cam.look_at(Vec3::ZERO, Vec3::Y);

        assert!(cam.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!(cam.right().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn look_at_degenerate_keeps_rotation() {
        let mut cam = camera();
        let before = cam.rotation();
        cam.look_at(cam.position(), Vec3::Y);
        assert_eq!(cam.rotation(), before);
    }

    #[test]
    fn center_pixel_ray_is_forward() {
        let cam = camera();
        let ray = cam.screen_point_to_ray(Vec2::new(400.0, 300.0));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(ray.origin, cam.position());
    }

    #[test]
    fn top_edge_ray_matches_half_fov() {
        let cam = camera();
        let ray = cam.screen_point_to_ray(Vec2::new(400.0, 0.0));
        let angle = ray.direction.angle_between(Vec3::NEG_Z);
        assert_abs_diff_eq!(angle, 30f32.to_radians(), epsilon = 1e-5);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn world_to_screen_inverts_ray() {
        let cam = camera();
        let pixel = Vec2::new(612.0, 143.0);
        let point = cam.screen_point_to_ray(pixel).point_at(4.2);

        let back = cam.world_to_screen(point).expect("in front");
        assert!(back.abs_diff_eq(pixel, 1e-2));
    }

    #[test]
    fn points_behind_do_not_project() {
        let cam = camera();
        assert!(cam.world_to_screen(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn zero_viewport_is_ignored() {
        let mut cam = camera();
        cam.set_viewport(UVec2::new(0, 600));
        assert_eq!(cam.viewport(), UVec2::new(800, 600));

        cam.set_viewport(UVec2::new(1024, 768));
        assert_eq!(cam.viewport(), UVec2::new(1024, 768));
    }
}
