//=========================================================================
// Lattice
//=========================================================================
//
// Snapping grid shared by all three axes.
//
//   snap(p) = round((p - offset) / increment) * increment + offset
//
// With the default increment of 0.1 and offset of 0.05, cube centres land
// on 0.05, 0.15, 0.25, ... which are the centres of the play volume cells.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Lattice =============================================================

/// Uniform 3-axis snapping grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    increment: f32,
    offset: f32,
}

impl Lattice {
    /// Creates a lattice. `increment` must be positive and finite; this is
    /// checked by [`crate::core::GameConfig::validate`].
    pub const fn new(increment: f32, offset: f32) -> Self {
        Self { increment, offset }
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Snaps a single coordinate to the nearest lattice value.
    pub fn snap_scalar(&self, value: f32) -> f32 {
        ((value - self.offset) / self.increment).round() * self.increment + self.offset
    }

    /// Snaps every axis independently.
    pub fn snap(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            self.snap_scalar(point.x),
            self.snap_scalar(point.y),
            self.snap_scalar(point.z),
        )
    }

    /// Integer cell index of a point along each axis.
    ///
    /// Two points snapping to the same lattice position share a cell.
    pub fn cell_of(&self, point: Vec3) -> glam::IVec3 {
        let scaled = (point - Vec3::splat(self.offset)) / self.increment;
        scaled.round().as_ivec3()
    }
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(0.1, 0.05)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
