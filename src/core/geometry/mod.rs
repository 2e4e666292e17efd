//=========================================================================
// Geometry
//=========================================================================
//
// Small, allocation-free geometric primitives used by the placement and
// camera systems.
//
// Components:
// - `lattice`: discrete snapping grid (increment + offset per axis)
// - `aabb`: axis-aligned boxes, overlap and ray slab tests
// - `ray`: rays and infinite planes (pointer projection)
//
//=========================================================================

//=== Module Declarations =================================================

mod aabb;
mod lattice;
mod ray;

//=== Public API ==========================================================

pub use aabb::Aabb;
pub use lattice::Lattice;
pub use ray::{Plane, Ray};
