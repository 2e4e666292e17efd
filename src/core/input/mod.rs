//=========================================================================
// Input
//
// Pointer samples in, semantic gestures out.
//
// Responsibilities:
// - Define the platform-neutral pointer sample format
// - Classify samples into swipes, drags, taps and double taps
// - Provide the shared gate that keeps orbiting and dragging exclusive
//
// Notes:
// The classifier is owned and fed by `Game` once per tick. The gate is
// cloned into the orbit camera and the placement engine at construction.
//
//=========================================================================

//=== Submodules ==========================================================

mod classifier;
pub mod event;
mod gate;

//=== Public API ==========================================================

pub use classifier::GestureClassifier;
pub use event::{Gesture, GestureKind, PointerPhase, PointerSample};
pub use gate::{GateHolder, InputGate};
