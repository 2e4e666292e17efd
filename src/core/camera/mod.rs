//=========================================================================
// Camera
//=========================================================================
//
// The single viewing camera and its discrete orbit controller.
//
// Architecture:
//   OrbitCamera ──owns──> Camera (pose + projection)
//        │                     ▲
//        │ holds InputGate     │ read-only (&Camera)
//        ▼ while animating     │
//   PlacementEngine ───────────┘ screen ray, forward axis
//
// State machine:
//   Idle ──swipe──> Animating ──t reaches 1──> Idle
//
//=========================================================================

//=== Module Declarations =================================================

mod orbit;
mod view;

//=== Public API ==========================================================

pub use orbit::{OrbitAnimation, OrbitCamera, OrbitDirection};
pub use view::Camera;
