//=========================================================================
// Rays & Planes
//=========================================================================
//
// Pointer projection primitives. A drag projects the pointer ray onto a
// plane through the piece, facing the camera.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Ray =================================================================

/// Half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at `distance` along the ray.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

//=== Plane ===============================================================

/// Infinite plane in Hessian normal form (`dot(normal, p) + d = 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Plane {
    /// Minimum |cos| between ray and plane normal for an intersection.
    const PARALLEL_EPSILON: f32 = 1e-6;

    /// Plane with the given normal through `point`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance from `point` to the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Distance along `ray` to the intersection.
    ///
    /// `None` when the ray is parallel to the plane or the plane lies
    /// behind the ray origin.
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < Self::PARALLEL_EPSILON {
            return None;
        }

        let t = -self.signed_distance(ray.origin) / denom;
        (t > 0.0).then_some(t)
    }

    /// Intersection point of `ray` with the plane.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        self.raycast(ray).map(|t| ray.point_at(t))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));
        assert_abs_diff_eq!(ray.direction.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perpendicular_ray_hits_plane() {
        let plane = Plane::from_normal_and_point(Vec3::NEG_Z, Vec3::new(0.05, 0.05, 0.05));
        let ray = Ray::new(Vec3::new(0.2, -0.3, 5.0), Vec3::NEG_Z);

        let hit = plane.intersect(&ray).expect("should intersect");
        assert!(hit.abs_diff_eq(Vec3::new(0.2, -0.3, 0.05), 1e-5), "{hit:?}");
    }

    #[test]
    fn oblique_ray_hits_plane() {
        let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));

        let t = plane.raycast(&ray).expect("should intersect");
        assert_abs_diff_eq!(t, 2.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::from_normal_and_point(Vec3::Z, Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(plane.raycast(&ray).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let plane = Plane::from_normal_and_point(Vec3::Z, Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(plane.raycast(&ray).is_none());
    }

    #[test]
    fn signed_distance_sign_follows_normal() {
        let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, 1.0, 0.0));
        assert!(plane.signed_distance(Vec3::new(0.0, 2.0, 0.0)) > 0.0);
        assert!(plane.signed_distance(Vec3::ZERO) < 0.0);
    }
}
