//=========================================================================
// Axis-Aligned Bounding Box
//=========================================================================
//
// Centre / half-extent representation. Every box in this crate is
// axis-aligned: pieces never rotate, so cube colliders stay aligned with
// the world axes for their entire lifetime.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::Ray;

//=== Aabb ================================================================

/// Axis-aligned box stored as centre + half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub const fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self { center, half_extents }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Same box moved by `delta`.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self::new(self.center + delta, self.half_extents)
    }

    /// Strict overlap test.
    ///
    /// Boxes only overlap if they interpenetrate by more than `tolerance`
    /// on every axis. Face-adjacent lattice cells (touching exactly) never
    /// overlap, which is what lets pieces sit flush against each other.
    pub fn overlaps(&self, other: &Aabb, tolerance: f32) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents - Vec3::splat(tolerance);
        gap.cmplt(reach).all()
    }

    /// Slab test. Returns the entry distance along the ray, if the ray hits
    /// the box in front of its origin (or starts inside it, giving 0).
    pub fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let min = self.min();
        let max = self.max();

        let mut t_near = 0.0_f32;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];

            if dir.abs() < f32::EPSILON {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min[axis] - origin) * inv;
            let mut t1 = (max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
