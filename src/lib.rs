//=========================================================================
// Tetracube — Library Root
//
// A tick-driven 3D block placement engine: pointer gestures drive a
// discrete orbit camera and drag a piece of unit cubes across a snapping
// lattice, with collision-checked moves and double-tap locking.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose the gameplay core (`core`) for headless use and testing
// - Keep the winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use tetracube::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every gameplay system. `Game` can be ticked directly with
// pointer samples, without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and converts winit events into pointer
// samples. `engine` wires the platform to the core thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
