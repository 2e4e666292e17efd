//=========================================================================
// Core Systems Orchestrator
//
// Runs the game on the logic (non-platform) thread at a fixed tick rate.
//
// Responsibilities:
// - Own the `Game` (or nothing, if startup validation failed)
// - Receive platform events over the crossbeam channel
// - Tick the game with a fixed timestep, one batch of pointer samples
//   per tick
// - Exit cleanly when the window closes or the channel disconnects
//
// Notes:
// The orchestrator is isolated from the platform layer; communication
// happens only through `PlatformEvent` messages. An inert orchestrator
// still drains the channel so the window stays responsive.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod camera;
pub mod collision;
pub mod config;
pub mod game;
pub mod geometry;
pub mod input;
pub mod piece;
pub mod placement;
pub(crate) mod platform_bridge;
pub mod render;
pub mod signals;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{info, warn};

//=== Internal Modules ====================================================

use game::Game;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    game: Option<Game>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(game: Game) -> Self {
        Self { game: Some(game) }
    }

    /// Orchestrator without a game. Ticks only drain platform events.
    pub fn inert() -> Self {
        warn!(target: "core", "Core running inert: no game will be ticked");
        Self { game: None }
    }

    pub fn is_inert(&self) -> bool {
        self.game.is_none()
    }

    //--- run_frame() ------------------------------------------------------
    //
    // One tick: collect platform events, apply a resize, tick the game.
    //
    fn run_frame(&mut self, collector: &mut EventCollector, dt: f32) -> TickControl {
        if let TickControl::Exit = collector.collect_frame() {
            return TickControl::Exit;
        }

        if let Some(game) = self.game.as_mut() {
            if let Some(viewport) = collector.viewport() {
                game.set_viewport(viewport);
            }
            game.tick(collector.samples(), dt);
        }

        TickControl::Continue
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread ticking at `tps`.
    //
    // Each tick:
    //  1. Collects platform events (non-blocking, bounded)
    //  2. Ticks the game with a fixed `1 / tps` delta
    //  3. Sleeps to maintain fixed pacing
    //  4. Exits cleanly when a shutdown signal is received
    //
    pub fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            info!(target: "core", "Core thread started ({} TPS)", tps);

            loop {
                let frame_start = Instant::now();

                if let TickControl::Exit = self.run_frame(&mut collector, dt) {
                    info!(target: "core", "Core thread exiting");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
