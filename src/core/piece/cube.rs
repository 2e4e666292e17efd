//=========================================================================
// Cube
//=========================================================================
//
// One unit collision volume of a piece. Its world box is derived from the
// owning piece's position and scale; the cube itself only stores its
// integer cell inside the piece and its live collision flags.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{IVec3, Vec3};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Aabb;

//=== Cube ================================================================

/// Unit cube inside a piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    cell: IVec3,
    is_colliding: bool,
    polling: bool,
}

impl Cube {
    pub(crate) fn new(cell: IVec3) -> Self {
        Self {
            cell,
            is_colliding: false,
            polling: true,
        }
    }

    /// Cell offset inside the piece, in unit-cube steps.
    pub fn cell(&self) -> IVec3 {
        self.cell
    }

    /// Result of the most recent collision poll.
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// Whether live collision polling is enabled for this cube.
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// World-space box for a piece at `origin` with the given `scale`.
    pub fn bounds(&self, origin: Vec3, scale: f32) -> Aabb {
        Aabb::new(
            origin + self.cell.as_vec3() * scale,
            Vec3::splat(scale * 0.5),
        )
    }

    pub(crate) fn set_colliding(&mut self, colliding: bool) {
        self.is_colliding = colliding;
    }

    pub(crate) fn stop_polling(&mut self) {
        self.polling = false;
        self.is_colliding = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
