//=========================================================================
// Input Event Types
//
// Platform-neutral pointer samples and the semantic gestures derived from
// them.
//
// Event Flow:
// ```text
// Platform Layer (winit mouse / touch)
//         ↓
//    PointerSample (this module)
//         ↓
//    GestureClassifier
//         ↓
//    Gesture → OrbitCamera | PlacementEngine
// ```
//
// Mouse and touch are not distinguished past the platform layer: a left
// button press and a first-finger touch both arrive as `Begin`.
//
//=========================================================================

//=== External Crates =====================================================

use glam::Vec2;

//=== PointerPhase ========================================================

/// Phase of a single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer pressed (button down / finger down).
    Begin,

    /// Pointer moved. Emitted whether or not the pointer is pressed.
    Move,

    /// Pointer released or the touch was cancelled.
    End,
}

//=== PointerSample =======================================================

/// Raw pointer sample in window pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn begin(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), phase: PointerPhase::Begin }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), phase: PointerPhase::Move }
    }

    pub fn end(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), phase: PointerPhase::End }
    }

    /// Returns `true` if two consecutive samples may be merged into one.
    ///
    /// Only moves coalesce; presses and releases are order-significant.
    pub fn coalesces_with(&self, next: &PointerSample) -> bool {
        self.phase == PointerPhase::Move && next.phase == PointerPhase::Move
    }
}

//=== GestureKind =========================================================

/// Semantic gesture recognised from a pointer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    SwipeLeft,
    SwipeRight,
    DragStart,
    DragMove,
    DragEnd,
    Tap,
    DoubleTap,
}

impl GestureKind {
    /// Gestures consumed by the orbit camera.
    pub fn is_swipe(self) -> bool {
        matches!(self, Self::SwipeLeft | Self::SwipeRight)
    }

    /// Gestures belonging to a drag session.
    pub fn is_drag(self) -> bool {
        matches!(self, Self::DragStart | Self::DragMove | Self::DragEnd)
    }
}

//=== Gesture =============================================================

/// A classified gesture. Produced and consumed within one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,

    /// Pointer position where the gesture (or its session) began.
    pub start: Vec2,

    /// Pointer position of the sample that produced the gesture.
    pub end: Vec2,

    /// Game time in seconds.
    pub timestamp: f32,
}

//=========================================================================
// Unit Tests
//=========================================================================
