//=========================================================================
// Signal Queue
//=========================================================================
//
// Per-tick queue of side effects leaving the core.
//
// Subsystems push signals while they update. `Game` drains the queue at
// the end of the tick and dispatches each signal to the presentation
// collaborators. The queue of the last tick stays inspectable until the
// next tick starts.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::camera::OrbitDirection;
use crate::core::piece::PieceId;

//=== GameSignal ==========================================================

/// Observable side effect of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameSignal {
    /// A new piece became active.
    PieceSpawned { piece: PieceId, shape: String },

    /// A drag committed a new lattice position (audio cue).
    MoveAccepted { piece: PieceId, position: Vec3 },

    /// A piece was locked (solid locked colour).
    PieceLocked { piece: PieceId },

    /// An orbit animation began.
    OrbitStarted { direction: OrbitDirection },

    /// An orbit animation reached its end pose.
    OrbitFinished,
}

//=== SignalQueue =========================================================

/// Ordered signals emitted during one tick.
#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    queue: Vec<GameSignal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a signal for dispatch at the end of the tick.
    pub fn push(&mut self, signal: GameSignal) {
        self.queue.push(signal);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameSignal> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Number of queued signals matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&GameSignal) -> bool) -> usize {
        self.queue.iter().filter(|s| predicate(s)).count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
