//=========================================================================
// Pieces
//=========================================================================
//
// Rigid groups of unit cubes and the catalog they are spawned from.
//
// Architecture:
//   PieceCatalog ──(CatalogSelector picks index)──> PieceFactory::spawn
//        │                                               │
//        └─ PieceShape { cells, color }                  └─> Piece { cubes, state }
//
// Lifecycle:
//   Active ──lock()──> Locked (terminal; position frozen, polling stops)
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;
mod cube;
mod piece;

//=== Public API ==========================================================

pub use catalog::{
    CatalogFactory, CatalogSelector, PieceCatalog, PieceFactory, PieceShape, RandomSelector,
    SequenceSelector,
};
pub use cube::Cube;
pub use piece::{Piece, PieceError, PieceState};

//=== Identifiers =========================================================

/// Unique identifier of a spawned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u64);

/// Addresses one cube of one piece (collider and render target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeKey {
    pub piece: PieceId,
    pub index: usize,
}
