//=========================================================================
// Placement
//=========================================================================
//
// Owns the single active piece and turns drag / double-tap gestures into
// collision-checked moves and locks.
//
// State machine over the active piece:
//   NoPiece ──spawn──> Active ──double tap (not colliding)──> Locked
//      ▲                                                        │
//      └───────────────────── next tick ────────────────────────┘
//
// Move pipeline (per drag-move):
//   pointer ray ∩ camera-facing plane ─> lattice snap ─> per-cube
//   overlap check at the candidate ─> commit + MoveAccepted
//
//=========================================================================

//=== Module Declarations =================================================

mod engine;

//=== Public API ==========================================================

pub use engine::PlacementEngine;

//=== Outcomes ============================================================

/// Result of a single drag-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The piece moved to a new lattice position.
    Moved(glam::Vec3),

    /// The candidate equals the current position. No side effect.
    Unchanged,

    /// A cube would overlap another piece. No side effect.
    Rejected,

    /// The pointer ray does not hit the movement plane.
    Missed,

    /// No drag session is open (or no active piece).
    Ignored,
}

/// Result of a lock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Locked(crate::core::piece::PieceId),

    /// The active piece currently overlaps another piece.
    Colliding,

    /// Locks are not accepted during a drag or an orbit.
    Busy,

    NoPiece,
}
