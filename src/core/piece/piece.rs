//=========================================================================
// Piece
//=========================================================================
//
// A rigid group of cubes sharing one translation. Orientation is fixed
// for the lifetime of the piece.
//
// Invariants:
// - While `Active`, every cube's world box is `origin + cell * scale`.
// - While `Locked`, the position never changes and cubes stop polling.
// - `is_colliding()` is the OR of every cube's last poll result.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::{IVec3, Vec3};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{Cube, CubeKey, PieceId, PieceShape};
use crate::core::collision::{ColliderCategory, CollisionOracle};
use crate::core::geometry::Aabb;
use crate::core::render::Color;

//=== PieceState ==========================================================

/// Lifecycle of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceState {
    /// Movable, polled every tick.
    Active,

    /// Permanently fixed in the play volume.
    Locked,
}

//=== PieceError ==========================================================

/// Defects in a piece definition, detected when the piece is built.
#[derive(Debug, Clone, PartialEq)]
pub enum PieceError {
    /// Shape has no cubes.
    NoCubes { shape: String },

    /// Two cubes of the same shape occupy one cell.
    DuplicateCell { shape: String, cell: IVec3 },

    /// Scale must be positive and finite.
    InvalidScale { shape: String, scale: f32 },

    /// Catalog index out of range.
    UnknownShape { index: usize, catalog_len: usize },
}

impl std::fmt::Display for PieceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCubes { shape } => write!(f, "piece '{}' has no cubes", shape),
            Self::DuplicateCell { shape, cell } => {
                write!(f, "piece '{}' has two cubes in cell {}", shape, cell)
            }
            Self::InvalidScale { shape, scale } => {
                write!(f, "piece '{}' has invalid scale {}", shape, scale)
            }
            Self::UnknownShape { index, catalog_len } => {
                write!(f, "catalog index {} out of range (len {})", index, catalog_len)
            }
        }
    }
}

impl std::error::Error for PieceError {}

//=== Piece ===============================================================

/// Rigid multi-cube piece.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    name: String,
    position: Vec3,
    scale: f32,
    base_color: Color,
    cubes: Vec<Cube>,
    state: PieceState,
}

impl Piece {
    //--- Construction -----------------------------------------------------

    /// Builds an active piece from a shape.
    ///
    /// # Errors
    ///
    /// Returns [`PieceError`] if the shape is empty, repeats a cell, or the
    /// scale is not a positive finite number.
    pub fn new(
        id: PieceId,
        shape: &PieceShape,
        position: Vec3,
        scale: f32,
    ) -> Result<Self, PieceError> {
        shape.validate()?;

        if !(scale.is_finite() && scale > 0.0) {
            return Err(PieceError::InvalidScale {
                shape: shape.name.clone(),
                scale,
            });
        }

        Ok(Self {
            id,
            name: shape.name.clone(),
            position,
            scale,
            base_color: shape.color,
            cubes: shape.cells.iter().copied().map(Cube::new).collect(),
            state: PieceState::Active,
        })
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == PieceState::Locked
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Aggregate collision flag (OR over cubes).
    pub fn is_colliding(&self) -> bool {
        self.cubes.iter().any(Cube::is_colliding)
    }

    pub fn cube_key(&self, index: usize) -> CubeKey {
        CubeKey { piece: self.id, index }
    }

    //--- Geometry ---------------------------------------------------------

    /// World boxes of every cube at the current position.
    pub fn cube_bounds(&self) -> impl Iterator<Item = (CubeKey, Aabb)> + '_ {
        self.cube_bounds_at(self.position)
    }

    /// World boxes of every cube if the piece were at `origin`.
    pub fn cube_bounds_at(&self, origin: Vec3) -> impl Iterator<Item = (CubeKey, Aabb)> + '_ {
        self.cubes
            .iter()
            .enumerate()
            .map(move |(index, cube)| (self.cube_key(index), cube.bounds(origin, self.scale)))
    }

    //--- Mutation ---------------------------------------------------------

    /// Moves an active piece. Returns `false` (and does nothing) once the
    /// piece is locked.
    pub(crate) fn move_to(&mut self, position: Vec3) -> bool {
        if self.is_locked() {
            return false;
        }
        self.position = position;
        true
    }

    /// Re-evaluates every cube against same-category colliders at its
    /// current box.
    ///
    /// Hits owned by this piece (the cube itself, its siblings, the root)
    /// are ignored. Locked pieces are skipped entirely. Returns the
    /// aggregate flag.
    pub fn poll_collisions<O: CollisionOracle + ?Sized>(&mut self, oracle: &O) -> bool {
        if self.is_locked() {
            return false;
        }

        let flags: Vec<bool> = self
            .cube_bounds()
            .map(|(_, bounds)| {
                oracle
                    .overlap_box(bounds.center, bounds.half_extents, ColliderCategory::PieceCube)
                    .iter()
                    .any(|hit| hit.owner != self.id)
            })
            .collect();

        for (cube, colliding) in self.cubes.iter_mut().zip(flags) {
            if cube.is_polling() {
                cube.set_colliding(colliding);
            }
        }

        self.is_colliding()
    }

    /// Freezes the piece. Idempotent.
    pub(crate) fn lock(&mut self) {
        if self.is_locked() {
            debug!(target: "placement", "Piece {:?} already locked", self.id);
            return;
        }

        self.state = PieceState::Locked;
        for cube in &mut self.cubes {
            cube.stop_polling();
        }
        info!(target: "placement", "Locked piece {:?} ('{}') at {}", self.id, self.name, self.position);
    }
}

//=== PieceShape Validation ===============================================

impl PieceShape {
    /// Checks the shape is non-empty with unique cells.
    pub fn validate(&self) -> Result<(), PieceError> {
        if self.cells.is_empty() {
            return Err(PieceError::NoCubes { shape: self.name.clone() });
        }

        let mut seen = HashSet::with_capacity(self.cells.len());
        for &cell in &self.cells {
            if !seen.insert(cell) {
                return Err(PieceError::DuplicateCell {
                    shape: self.name.clone(),
                    cell,
                });
            }
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
