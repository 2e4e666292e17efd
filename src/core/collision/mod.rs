//=========================================================================
// Collision
//=========================================================================
//
// Abstraction over the spatial queries the game needs from a geometry
// backend, plus an in-memory backend.
//
// Architecture:
//   PlacementEngine / Piece ──overlap_box()/raycast()──> dyn CollisionOracle
//   PlacementEngine ──sync_piece()──> dyn ColliderRegistry
//                                                           │
//                                                  ColliderSet (default)
//
// All queries are synchronous and complete within the tick. Boxes are
// always axis-aligned (identity orientation).
//
//=========================================================================

//=== Module Declarations =================================================

mod collider_set;

//=== Public API ==========================================================

pub use collider_set::ColliderSet;

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Ray;
use crate::core::piece::{Piece, PieceId};

//=== ColliderCategory ====================================================

/// Collision layer used to filter queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderCategory {
    /// A unit cube belonging to a piece.
    PieceCube,
}

//=== ColliderHandle ======================================================

/// Identifies a collider returned by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle {
    /// Piece that owns the collider.
    pub owner: PieceId,

    /// Cube index inside the owner.
    pub index: usize,

    pub category: ColliderCategory,
}

//=== RaycastHit ==========================================================

/// Nearest collider along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub handle: ColliderHandle,
    pub distance: f32,
}

//=== CollisionOracle =====================================================

/// Spatial query backend.
pub trait CollisionOracle {
    /// All colliders of `category` whose boxes intersect the axis-aligned
    /// query box.
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        category: ColliderCategory,
    ) -> Vec<ColliderHandle>;

    /// Nearest collider of `category` hit by `ray`.
    fn raycast(&self, ray: &Ray, category: ColliderCategory) -> Option<RaycastHit>;
}

//=== ColliderRegistry ====================================================

/// Oracle whose colliders are kept in step with piece positions by the
/// caller.
pub trait ColliderRegistry: CollisionOracle + Send {
    /// Inserts or moves every cube collider of `piece`.
    fn sync_piece(&mut self, piece: &Piece);
}
