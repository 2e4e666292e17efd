//=========================================================================
// Tetracube Engine
//
// Main entry point: wires the game, the core thread and the platform.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns core thread
//         ├─ with_channel_capacity()    runs platform
//         ├─ with_config()              blocks until exit
//         └─ with_catalog() ...
// ```
//
// A startup defect never aborts the process: it is logged and the core
// thread runs inert so the window can still be closed.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::UVec2;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::collision::ColliderRegistry;
use crate::core::config::GameConfig;
use crate::core::game::GameBuilder;
use crate::core::piece::{CatalogSelector, PieceCatalog, PieceFactory};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::{AudioSink, Renderer};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Title**: "Tetracube"
/// - **Pieces**: [`PieceCatalog::standard`]
///
/// # Examples
///
/// ```no_run
/// use tetracube::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_viewport(1280, 720)
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    title: String,
    config: GameConfig,
    game: GameBuilder,
    has_piece_source: bool,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: String::from("Tetracube"),
            config: GameConfig::default(),
            game: GameBuilder::new(),
            has_piece_source: false,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Every tick advances the game by exactly `1 / tps` seconds, so
    /// orbit timing and the double-tap window are measured in game time.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces every game tunable, including the initial viewport.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial window and camera viewport, in physical pixels.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.config.camera.viewport = UVec2::new(width, height);
        self
    }

    pub fn with_catalog(mut self, catalog: PieceCatalog) -> Self {
        self.game = self.game.with_catalog(catalog);
        self.has_piece_source = true;
        self
    }

    pub fn with_factory(mut self, factory: Box<dyn PieceFactory>) -> Self {
        self.game = self.game.with_factory(factory);
        self.has_piece_source = true;
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn CatalogSelector>) -> Self {
        self.game = self.game.with_selector(selector);
        self
    }

    pub fn with_colliders(mut self, colliders: Box<dyn ColliderRegistry>) -> Self {
        self.game = self.game.with_colliders(colliders);
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.game = self.game.with_renderer(renderer);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.game = self.game.with_audio(audio);
        self
    }

    /// Builds the engine instance.
    ///
    /// Game wiring is validated here. On failure the error is logged and
    /// the returned engine is inert (see [`Engine::is_inert`]).
    pub fn build(self) -> Engine {
        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {})",
            self.tps,
            self.channel_capacity
        );

        let viewport = self.config.camera.viewport;
        let mut game = self.game.with_config(self.config);
        if !self.has_piece_source {
            game = game.with_catalog(PieceCatalog::standard());
        }

        let orchestrator = match game.build() {
            Ok(game) => CoreSystemsOrchestrator::new(game),
            Err(e) => {
                error!(target: "engine", "Game startup failed: {}", e);
                CoreSystemsOrchestrator::inert()
            }
        };

        Engine {
            orchestrator,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            title: self.title,
            viewport,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Tetracube runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► Game: gestures, orbit camera, placement, collisions
///   │
///   └─► Platform (Event Loop)
///         └─► Window, pointer and touch polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    title: String,
    viewport: UVec2,
}

impl Engine {
    /// True when game startup failed and the core thread will not tick
    /// any gameplay.
    pub fn is_inert(&self) -> bool {
        self.orchestrator.is_inert()
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → core thread sees `WindowClosed`
    ///    or a disconnect and terminates
    pub fn run(self) {
        info!(target: "engine", "Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!(target: "engine", "Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.title, self.viewport);

        if let Err(e) = platform.run() {
            error!(target: "engine", "Platform error: {}", e);
        }

        info!(target: "engine", "Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread ------------------------
        match core_handle.join() {
            Ok(()) => info!(target: "engine", "Core thread terminated cleanly"),
            Err(e) => error!(target: "engine", "Core thread panicked: {:?}", e),
        }

        info!(target: "engine", "Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
