//=========================================================================
// Piece Catalog & Factory
//=========================================================================
//
// Shapes available to the player and the factory that instantiates them
// at the spawn point.
//
// Which shape comes next is decided by a `CatalogSelector`; the default
// picks uniformly at random, tests use a fixed sequence.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{IVec3, Vec3};
use log::info;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{Piece, PieceError, PieceId};
use crate::core::render::Color;

//=== PieceShape ==========================================================

/// Cube layout and colour of one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceShape {
    pub name: String,
    pub cells: Vec<IVec3>,
    pub color: Color,
}

impl PieceShape {
    pub fn new(name: impl Into<String>, cells: Vec<IVec3>, color: Color) -> Self {
        Self {
            name: name.into(),
            cells,
            color,
        }
    }
}

//=== PieceCatalog ========================================================

/// Ordered list of spawnable shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceCatalog {
    shapes: Vec<PieceShape>,
}

impl PieceCatalog {
    pub fn new(shapes: Vec<PieceShape>) -> Self {
        Self { shapes }
    }

    /// The flat tetrominoes, the three chiral/branch tetracubes and a
    /// domino.
    pub fn standard() -> Self {
        let c = IVec3::new;
        Self::new(vec![
            PieceShape::new("I", vec![c(0, 0, 0), c(1, 0, 0), c(2, 0, 0), c(3, 0, 0)], Color::CYAN),
            PieceShape::new("O", vec![c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(1, 1, 0)], Color::YELLOW),
            PieceShape::new("T", vec![c(0, 0, 0), c(1, 0, 0), c(2, 0, 0), c(1, 1, 0)], Color::MAGENTA),
            PieceShape::new("L", vec![c(0, 0, 0), c(1, 0, 0), c(2, 0, 0), c(2, 1, 0)], Color::ORANGE),
            PieceShape::new("S", vec![c(0, 0, 0), c(1, 0, 0), c(1, 1, 0), c(2, 1, 0)], Color::GREEN),
            PieceShape::new("Screw-L", vec![c(0, 0, 0), c(1, 0, 0), c(1, 1, 0), c(1, 1, 1)], Color::RED),
            PieceShape::new("Screw-R", vec![c(0, 0, 0), c(1, 0, 0), c(1, 1, 0), c(0, 0, 1)], Color::BLUE),
            PieceShape::new("Branch", vec![c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(0, 0, 1)], Color::rgb(0.6, 0.3, 0.9)),
            PieceShape::new("Domino", vec![c(0, 0, 0), c(1, 0, 0)], Color::WHITE),
        ])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PieceShape> {
        self.shapes.get(index)
    }

    pub fn shapes(&self) -> &[PieceShape] {
        &self.shapes
    }

    /// Validates every shape, returning the first defect.
    pub fn validate(&self) -> Result<(), PieceError> {
        self.shapes.iter().try_for_each(PieceShape::validate)
    }
}

//=== CatalogSelector =====================================================

/// Chooses the catalog index of the next piece.
pub trait CatalogSelector: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uniform random selection.
#[derive(Debug, Default)]
pub struct RandomSelector;

impl CatalogSelector for RandomSelector {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Cycles through a fixed list of indices (wrapping modulo `len`).
#[derive(Debug, Clone)]
pub struct SequenceSelector {
    sequence: Vec<usize>,
    cursor: usize,
}

impl SequenceSelector {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self { sequence, cursor: 0 }
    }
}

impl CatalogSelector for SequenceSelector {
    fn next_index(&mut self, len: usize) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let index = self.sequence[self.cursor % self.sequence.len()];
        self.cursor += 1;
        index % len
    }
}

//=== PieceFactory ========================================================

/// Instantiates pieces at the spawn point.
pub trait PieceFactory: Send {
    /// Number of catalog entries. Zero means nothing can ever spawn.
    fn catalog_len(&self) -> usize;

    /// Builds a fresh active piece from catalog entry `index`.
    fn spawn(&mut self, index: usize) -> Result<Piece, PieceError>;
}

/// Factory backed by a [`PieceCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogFactory {
    catalog: PieceCatalog,
    spawn_position: Vec3,
    scale: f32,
    next_id: u64,
}

impl CatalogFactory {
    pub fn new(catalog: PieceCatalog, spawn_position: Vec3, scale: f32) -> Self {
        Self {
            catalog,
            spawn_position,
            scale,
            next_id: 1,
        }
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }
}

impl PieceFactory for CatalogFactory {
    fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    fn spawn(&mut self, index: usize) -> Result<Piece, PieceError> {
        let shape = self.catalog.get(index).ok_or(PieceError::UnknownShape {
            index,
            catalog_len: self.catalog.len(),
        })?;

        let piece = Piece::new(PieceId(self.next_id), shape, self.spawn_position, self.scale)?;
        self.next_id += 1;

        info!(
            target: "placement",
            "Spawned piece {:?} ('{}') at {}",
            piece.id(),
            piece.name(),
            piece.position()
        );
        Ok(piece)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceState;

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = PieceCatalog::standard();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.validate(), Ok(()));
    }

    #[test]
    fn catalog_validation_reports_broken_shape() {
        let catalog = PieceCatalog::new(vec![
            PieceShape::new("ok", vec![IVec3::ZERO], Color::RED),
            PieceShape::new("broken", vec![], Color::RED),
        ]);
        assert_eq!(
            catalog.validate(),
            Err(PieceError::NoCubes { shape: "broken".into() })
        );
    }

    #[test]
    fn random_selector_stays_in_range() {
        let mut selector = RandomSelector;
        for _ in 0..200 {
            assert!(selector.next_index(7) < 7);
        }
    }

    #[test]
    fn sequence_selector_cycles_and_wraps() {
        let mut selector = SequenceSelector::new(vec![2, 0, 5]);
        let picks: Vec<usize> = (0..4).map(|_| selector.next_index(4)).collect();
        assert_eq!(picks, vec![2, 0, 1, 2]);
    }

    #[test]
    fn factory_spawns_at_spawn_point_with_fresh_ids() {
        let mut factory = CatalogFactory::new(PieceCatalog::standard(), Vec3::splat(0.05), 0.1);

        let a = factory.spawn(0).unwrap();
        let b = factory.spawn(8).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.position(), Vec3::splat(0.05));
        assert_eq!(a.scale(), 0.1);
        assert_eq!(a.state(), PieceState::Active);
        assert_eq!(b.name(), "Domino");
    }

    #[test]
    fn factory_rejects_unknown_index() {
        let mut factory = CatalogFactory::new(PieceCatalog::standard(), Vec3::ZERO, 0.1);
        let err = factory.spawn(99).unwrap_err();
        assert_eq!(err, PieceError::UnknownShape { index: 99, catalog_len: 9 });
    }
}
