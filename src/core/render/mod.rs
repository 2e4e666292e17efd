//=========================================================================
// Presentation Collaborators
//=========================================================================
//
// Output side of the core: colour changes and audio cues.
//
// The core never reads rendering state back. It pushes colours through
// `Renderer` and fire-and-forget cues through `AudioSink`; the host
// application decides what those mean on screen and through speakers.
//
// Components:
// - `color`: RGBA colour with HSV conversion
// - `shading`: camera-distance brightness for active cubes
// - `Renderer` / `AudioSink`: collaborator traits (+ logging defaults)
//
//=========================================================================

//=== Module Declarations =================================================

mod color;
mod shading;

//=== Public API ==========================================================

pub use color::Color;
pub use shading::DepthShader;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::piece::CubeKey;

//=== Renderer ============================================================

/// Receives per-cube colour updates.
pub trait Renderer: Send {
    /// Sets the colour of a single cube.
    fn set_cube_color(&mut self, cube: CubeKey, color: Color);
}

//=== AudioSink ===========================================================

/// Fire-and-forget audio cues.
pub trait AudioSink: Send {
    /// A piece moved to a new lattice cell.
    fn play_move_cue(&mut self);
}

//=== Logging Defaults ====================================================

/// Renderer that only traces colour changes.
///
/// Used when the host has not attached a real renderer.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn set_cube_color(&mut self, cube: CubeKey, color: Color) {
        trace!(target: "render", "{:?} -> {:?}", cube, color);
    }
}

/// Audio sink that only traces cues.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_move_cue(&mut self) {
        trace!(target: "audio", "move cue");
    }
}
