//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tetracube::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};

// Game wiring
pub use crate::core::config::{CameraConfig, ConfigError, GameConfig};
pub use crate::core::game::{Game, GameBuilder, StartupError};
pub use crate::core::signals::{GameSignal, SignalQueue};

// Geometry
pub use crate::core::geometry::{Aabb, Lattice, Plane, Ray};

// Input
pub use crate::core::input::{
    GateHolder, Gesture, GestureClassifier, GestureKind, InputGate, PointerPhase, PointerSample,
};

// Camera
pub use crate::core::camera::{Camera, OrbitCamera, OrbitDirection};

// Pieces
pub use crate::core::piece::{
    CatalogFactory, CatalogSelector, Cube, CubeKey, Piece, PieceCatalog, PieceError,
    PieceFactory, PieceId, PieceShape, PieceState, RandomSelector, SequenceSelector,
};

// Placement
pub use crate::core::placement::{LockOutcome, MoveOutcome, PlacementEngine};

// Collision
pub use crate::core::collision::{
    ColliderCategory, ColliderHandle, ColliderRegistry, ColliderSet, CollisionOracle,
    RaycastHit,
};

// Presentation collaborators
pub use crate::core::render::{AudioSink, Color, DepthShader, Renderer};
