//=========================================================================
// Collider Set
//=========================================================================
//
// Brute-force, in-memory collision backend. Stores one box per cube,
// keyed by owning piece, and answers overlap and ray queries by linear
// scan. The play volume holds at most a few hundred cubes, well within
// a tick budget.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use glam::Vec3;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{ColliderCategory, ColliderHandle, ColliderRegistry, CollisionOracle, RaycastHit};
use crate::core::geometry::{Aabb, Ray};
use crate::core::piece::{Piece, PieceId};

//=== ColliderSet =========================================================

/// Boxes grouped by owner.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    owners: BTreeMap<PieceId, Vec<(ColliderHandle, Aabb)>>,
    tolerance: f32,
}

impl ColliderSet {
    /// Creates an empty set. Boxes must interpenetrate by more than
    /// `tolerance` on every axis to count as overlapping.
    pub fn new(tolerance: f32) -> Self {
        Self {
            owners: BTreeMap::new(),
            tolerance,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Total number of colliders.
    pub fn len(&self) -> usize {
        self.owners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Internal Helpers -------------------------------------------------

    fn iter_category(
        &self,
        category: ColliderCategory,
    ) -> impl Iterator<Item = &(ColliderHandle, Aabb)> {
        self.owners
            .values()
            .flatten()
            .filter(move |(handle, _)| handle.category == category)
    }
}

//=== CollisionOracle =====================================================

impl CollisionOracle for ColliderSet {
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        category: ColliderCategory,
    ) -> Vec<ColliderHandle> {
        let query = Aabb::new(center, half_extents);
        self.iter_category(category)
            .filter(|(_, bounds)| bounds.overlaps(&query, self.tolerance))
            .map(|(handle, _)| *handle)
            .collect()
    }

    fn raycast(&self, ray: &Ray, category: ColliderCategory) -> Option<RaycastHit> {
        self.iter_category(category)
            .filter_map(|(handle, bounds)| {
                bounds.ray_distance(ray).map(|distance| RaycastHit {
                    handle: *handle,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

//=== ColliderRegistry ====================================================

impl ColliderRegistry for ColliderSet {
    /// Inserts or replaces all cube colliders of `piece` at its current
    /// position.
    fn sync_piece(&mut self, piece: &Piece) {
        let boxes = piece
            .cube_bounds()
            .map(|(key, bounds)| {
                let handle = ColliderHandle {
                    owner: key.piece,
                    index: key.index,
                    category: ColliderCategory::PieceCube,
                };
                (handle, bounds)
            })
            .collect();

        trace!(target: "collision", "Synced colliders of {:?}", piece.id());
        self.owners.insert(piece.id(), boxes);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceShape;
    use crate::core::render::Color;
    use glam::IVec3;

    fn piece(id: u64, at: Vec3) -> Piece {
        let shape = PieceShape::new("domino", vec![IVec3::ZERO, IVec3::X], Color::RED);
        Piece::new(PieceId(id), &shape, at, 0.1).unwrap()
    }

    #[test]
    fn sync_registers_every_cube() {
        let mut set = ColliderSet::new(1e-4);
        set.sync_piece(&piece(1, Vec3::splat(0.05)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn resync_replaces_previous_boxes() {
        let mut set = ColliderSet::new(1e-4);
        let mut p = piece(1, Vec3::splat(0.05));
        set.sync_piece(&p);

        p.move_to(Vec3::new(0.05, 0.55, 0.05));
        set.sync_piece(&p);

        assert_eq!(set.len(), 2);
        let old = set.overlap_box(Vec3::splat(0.05), Vec3::splat(0.05), ColliderCategory::PieceCube);
        assert!(old.is_empty());
    }

    #[test]
    fn overlap_reports_owner_and_index() {
        let mut set = ColliderSet::new(1e-4);
        set.sync_piece(&piece(7, Vec3::splat(0.05)));

        let hits = set.overlap_box(
            Vec3::new(0.15, 0.05, 0.05),
            Vec3::splat(0.05),
            ColliderCategory::PieceCube,
        );

        assert_eq!(
            hits,
            vec![ColliderHandle {
                owner: PieceId(7),
                index: 1,
                category: ColliderCategory::PieceCube,
            }]
        );
    }

    #[test]
    fn adjacent_query_reports_nothing() {
        let mut set = ColliderSet::new(1e-4);
        set.sync_piece(&piece(7, Vec3::splat(0.05)));

        let hits = set.overlap_box(
            Vec3::new(0.25, 0.05, 0.05),
            Vec3::splat(0.05),
            ColliderCategory::PieceCube,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn raycast_returns_nearest_hit() {
        let mut set = ColliderSet::new(1e-4);
        set.sync_piece(&piece(1, Vec3::new(0.05, 0.05, -0.45)));
        set.sync_piece(&piece(2, Vec3::new(0.05, 0.05, 0.05)));

        let ray = Ray::new(Vec3::new(0.05, 0.05, 5.0), Vec3::NEG_Z);
        let hit = set.raycast(&ray, ColliderCategory::PieceCube).expect("should hit");

        assert_eq!(hit.handle.owner, PieceId(2));
    }

    #[test]
    fn raycast_misses_empty_space() {
        let mut set = ColliderSet::new(1e-4);
        set.sync_piece(&piece(1, Vec3::splat(0.05)));

        let ray = Ray::new(Vec3::new(3.0, 3.0, 5.0), Vec3::NEG_Z);
        assert!(set.raycast(&ray, ColliderCategory::PieceCube).is_none());
    }
}
