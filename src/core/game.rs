//=========================================================================
// Game
//=========================================================================
//
// Owns every gameplay subsystem and runs one tick in a fixed order.
//
// Tick order:
//  1. Classify pointer samples into gestures
//  2. Camera step (route swipes, advance the orbit animation)
//  3. Placement step (spawn if needed, route drag / double-tap gestures)
//  4. Live collision poll of the active piece
//  5. Depth shading of the active piece
//  6. Dispatch signals to the renderer and audio collaborators
//
// Startup wiring is validated once in `GameBuilder::build`. Ticks never
// fail; expected refusals are logged at debug level.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::camera::{Camera, OrbitCamera};
use crate::core::collision::{ColliderRegistry, ColliderSet};
use crate::core::config::{ConfigError, GameConfig};
use crate::core::input::{Gesture, GestureClassifier, InputGate, PointerSample};
use crate::core::piece::{
    CatalogFactory, CatalogSelector, Piece, PieceCatalog, PieceError, PieceFactory,
    RandomSelector,
};
use crate::core::placement::PlacementEngine;
use crate::core::render::{AudioSink, DepthShader, LogAudio, LogRenderer, Renderer};
use crate::core::signals::{GameSignal, SignalQueue};

//=== StartupError ========================================================

/// Fatal wiring or configuration defect detected before the first tick.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    /// Neither a catalog nor a piece factory was supplied.
    MissingPieceSource,

    /// The supplied catalog has no shapes.
    EmptyCatalog,

    /// A catalog shape cannot be instantiated.
    InvalidShape(PieceError),

    /// A configuration value (including the camera) is invalid.
    InvalidConfig(ConfigError),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPieceSource => write!(f, "no piece catalog or factory configured"),
            Self::EmptyCatalog => write!(f, "piece catalog is empty"),
            Self::InvalidShape(err) => write!(f, "invalid piece shape: {}", err),
            Self::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidShape(err) => Some(err),
            Self::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

//=== GameBuilder =========================================================

enum PieceSource {
    Catalog(PieceCatalog),
    Factory(Box<dyn PieceFactory>),
}

/// Wires the game together.
///
/// # Example
///
/// ```no_run
/// use tetracube::prelude::*;
///
/// let game = GameBuilder::new()
///     .with_catalog(PieceCatalog::standard())
///     .build()
///     .expect("valid setup");
/// ```
pub struct GameBuilder {
    config: GameConfig,
    pieces: Option<PieceSource>,
    selector: Box<dyn CatalogSelector>,
    colliders: Option<Box<dyn ColliderRegistry>>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            pieces: None,
            selector: Box::new(RandomSelector),
            colliders: None,
            renderer: Box::new(LogRenderer),
            audio: Box::new(LogAudio),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Pieces are spawned from `catalog` at the configured spawn point.
    pub fn with_catalog(mut self, catalog: PieceCatalog) -> Self {
        self.pieces = Some(PieceSource::Catalog(catalog));
        self
    }

    /// Replaces the catalog with a custom factory.
    pub fn with_factory(mut self, factory: Box<dyn PieceFactory>) -> Self {
        self.pieces = Some(PieceSource::Factory(factory));
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn CatalogSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Replaces the built-in [`ColliderSet`].
    pub fn with_colliders(mut self, colliders: Box<dyn ColliderRegistry>) -> Self {
        self.colliders = Some(colliders);
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    //--- build() ----------------------------------------------------------

    /// Validates the wiring and builds the game.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] for an invalid config, a missing or empty
    /// catalog, or a catalog shape that cannot be instantiated.
    pub fn build(self) -> Result<Game, StartupError> {
        let config = self.config;
        config.validate()?;

        let factory: Box<dyn PieceFactory> = match self.pieces {
            None => return Err(StartupError::MissingPieceSource),
            Some(PieceSource::Factory(factory)) => factory,
            Some(PieceSource::Catalog(catalog)) => {
                if catalog.is_empty() {
                    return Err(StartupError::EmptyCatalog);
                }
                catalog.validate().map_err(StartupError::InvalidShape)?;
                Box::new(CatalogFactory::new(
                    catalog,
                    config.spawn_position,
                    config.spawn_scale,
                ))
            }
        };

        let colliders = self
            .colliders
            .unwrap_or_else(|| Box::new(ColliderSet::new(config.contact_tolerance)));

        let catalog_len = factory.catalog_len();
        let gate = InputGate::new();
        let orbit = OrbitCamera::from_config(&config, gate.clone());
        let placement = PlacementEngine::new(config.lattice, factory, self.selector, gate);

        info!(target: "game", "Game ready ({} catalog entries)", catalog_len);

        Ok(Game {
            classifier: GestureClassifier::from_config(&config),
            shader: DepthShader::new(config.shade_near, config.shade_far),
            orbit,
            placement,
            colliders,
            renderer: self.renderer,
            audio: self.audio,
            signals: SignalQueue::new(),
            gestures: Vec::with_capacity(8),
            clock: 0.0,
            tick: 0,
            config,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

pub struct Game {
    config: GameConfig,
    classifier: GestureClassifier,
    orbit: OrbitCamera,
    placement: PlacementEngine,
    colliders: Box<dyn ColliderRegistry>,
    shader: DepthShader,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    signals: SignalQueue,
    gestures: Vec<Gesture>,
    clock: f32,
    tick: u64,
}

impl Game {
    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        self.orbit.camera()
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn placement(&self) -> &PlacementEngine {
        &self.placement
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.placement.active()
    }

    /// Signals emitted during the last tick.
    pub fn signals(&self) -> &SignalQueue {
        &self.signals
    }

    /// Game time in seconds (sum of tick deltas).
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    //--- Platform Hooks ---------------------------------------------------

    pub fn set_viewport(&mut self, viewport: UVec2) {
        debug!(target: "game", "Viewport resized to {}", viewport);
        self.orbit.camera_mut().set_viewport(viewport);
    }

    //--- tick() -----------------------------------------------------------
    //
    // Advances the game by `dt` seconds, consuming this tick's pointer
    // samples in arrival order.
    //
    pub fn tick(&mut self, samples: &[PointerSample], dt: f32) {
        self.tick += 1;
        self.clock += dt.max(0.0);
        self.signals.clear();

        //--- Step 1: Classify input ------------------------------------------
        self.classify(samples);

        //--- Step 2: Camera ----------------------------------------------------
        for gesture in self.gestures.iter().filter(|g| g.kind.is_swipe()) {
            self.orbit.handle_gesture(gesture, &mut self.signals);
        }
        self.orbit.advance(dt, &mut self.signals);

        //--- Step 3: Placement ------------------------------------------------
        self.placement.ensure_piece(self.colliders.as_mut(), &mut self.signals);
        for gesture in self.gestures.iter().filter(|g| !g.kind.is_swipe()) {
            self.placement.handle_gesture(
                gesture,
                self.orbit.camera(),
                self.colliders.as_mut(),
                &mut self.signals,
            );
        }

        //--- Step 4: Collision poll ---------------------------------------
        self.placement.poll_collisions(self.colliders.as_ref());

        //--- Step 5: Depth shading ----------------------------------------
        self.shade_active_piece();

        //--- Step 6: Dispatch ---------------------------------------------
        self.dispatch_signals();
    }

    //--- Internal Steps ---------------------------------------------------

    fn classify(&mut self, samples: &[PointerSample]) {
        self.gestures.clear();

        let placement = &self.placement;
        let camera = self.orbit.camera();
        let colliders = self.colliders.as_ref();

        for sample in samples {
            self.classifier.feed(
                *sample,
                self.clock,
                |pixel| placement.is_over_active_piece(camera, pixel, colliders),
                &mut self.gestures,
            );
        }
    }

    fn shade_active_piece(&mut self) {
        let Some(piece) = self.placement.active() else {
            return;
        };

        let eye = self.orbit.camera().position();
        for (key, bounds) in piece.cube_bounds() {
            let color = self.shader.shade(piece.base_color(), eye, bounds.center);
            self.renderer.set_cube_color(key, color);
        }
    }

    fn dispatch_signals(&mut self) {
        for signal in self.signals.iter() {
            match signal {
                GameSignal::MoveAccepted { .. } => self.audio.play_move_cue(),
                GameSignal::PieceLocked { piece } => {
                    if let Some(locked) = self.placement.locked_piece(*piece) {
                        for (key, _) in locked.cube_bounds() {
                            self.renderer.set_cube_color(key, self.config.locked_color);
                        }
                    }
                }
                GameSignal::PieceSpawned { piece, shape } => {
                    debug!(target: "game", "Spawned {:?} ('{}')", piece, shape);
                }
                GameSignal::OrbitStarted { direction } => {
                    debug!(target: "game", "Orbit {:?} started", direction);
                }
                GameSignal::OrbitFinished => {
                    debug!(target: "game", "Orbit finished");
                }
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("tick", &self.tick)
            .field("clock", &self.clock)
            .field("orbit", &self.orbit.animation())
            .field("placement", &self.placement)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::{CubeKey, PieceShape, SequenceSelector};
    use crate::core::render::Color;
    use approx::assert_abs_diff_eq;
    use glam::{IVec3, Vec2, Vec3};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const DT: f32 = 1.0 / 60.0;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Clone, Default)]
    struct Recorder {
        colors: Arc<Mutex<Vec<(CubeKey, Color)>>>,
        cues: Arc<AtomicUsize>,
    }

    impl Recorder {
        fn cues(&self) -> usize {
            self.cues.load(Ordering::SeqCst)
        }

        fn colors(&self) -> Vec<(CubeKey, Color)> {
            self.colors.lock().unwrap().clone()
        }

        fn reset(&self) {
            self.colors.lock().unwrap().clear();
        }
    }

    impl Renderer for Recorder {
        fn set_cube_color(&mut self, cube: CubeKey, color: Color) {
            self.colors.lock().unwrap().push((cube, color));
        }
    }

    impl AudioSink for Recorder {
        fn play_move_cue(&mut self) {
            self.cues.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn domino() -> PieceCatalog {
        PieceCatalog::new(vec![PieceShape::new(
            "domino",
            vec![IVec3::ZERO, IVec3::X],
            Color::BLUE,
        )])
    }

    fn game() -> (Game, Recorder) {
        let recorder = Recorder::default();
        let game = GameBuilder::new()
            .with_catalog(domino())
            .with_selector(Box::new(SequenceSelector::new(vec![0])))
            .with_renderer(Box::new(recorder.clone()))
            .with_audio(Box::new(recorder.clone()))
            .build()
            .unwrap();
        (game, recorder)
    }

    fn pixel_of(game: &Game, point: Vec3) -> Vec2 {
        game.camera().world_to_screen(point).unwrap()
    }

    fn drag(game: &mut Game, from: Vec3, to: Vec3) {
        let a = pixel_of(game, from);
        let b = pixel_of(game, to);
        game.tick(
            &[
                PointerSample::begin(a.x, a.y),
                PointerSample::moved(b.x, b.y),
                PointerSample::end(b.x, b.y),
            ],
            DT,
        );
    }

    fn tap(game: &mut Game) {
        game.tick(&[PointerSample::begin(20.0, 20.0), PointerSample::end(20.0, 20.0)], DT);
    }

    fn locked_signals(game: &Game) -> usize {
        game.signals().count(|s| matches!(s, GameSignal::PieceLocked { .. }))
    }

    //=====================================================================
    // Startup
    //=====================================================================

    #[test]
    fn missing_catalog_is_fatal() {
        let err = GameBuilder::new().build().unwrap_err();
        assert_eq!(err, StartupError::MissingPieceSource);
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let err = GameBuilder::new().with_catalog(PieceCatalog::default()).build().unwrap_err();
        assert_eq!(err, StartupError::EmptyCatalog);
    }

    #[test]
    fn broken_shape_is_fatal() {
        let catalog = PieceCatalog::new(vec![PieceShape::new("bad", vec![], Color::RED)]);
        let err = GameBuilder::new().with_catalog(catalog).build().unwrap_err();
        assert!(matches!(err, StartupError::InvalidShape(PieceError::NoCubes { .. })));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = GameConfig::default().with_orbit_speed(0.0);
        let err = GameBuilder::new()
            .with_config(config)
            .with_catalog(domino())
            .build()
            .unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    //=====================================================================
    // Spawning & Shading
    //=====================================================================

    #[test]
    fn first_tick_spawns_and_shades() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);

        let piece = game.active_piece().expect("spawned");
        assert_eq!(piece.position(), Vec3::splat(0.05));

        let colors = recorder.colors();
        assert_eq!(colors.len(), 2);
        // cube 0 sits ~4.95 from the camera: brightness ~0.55
        let (key, color) = colors[0];
        assert_eq!(key.index, 0);
        assert_abs_diff_eq!(color.b, 0.5495, epsilon = 1e-3);
        assert_eq!(color.r, 0.0);
    }

    //=====================================================================
    // Dragging
    //=====================================================================

    #[test]
    fn drag_moves_piece_and_plays_cue_once() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);

        drag(&mut game, Vec3::splat(0.05), Vec3::new(0.05, 0.25, 0.05));

        let position = game.active_piece().unwrap().position();
        assert!(position.abs_diff_eq(Vec3::new(0.05, 0.25, 0.05), 1e-5));
        assert_eq!(recorder.cues(), 1);
        assert!(!game.placement().is_dragging());
    }

    #[test]
    fn drag_on_empty_space_does_nothing() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);

        drag(&mut game, Vec3::new(0.05, 1.0, 0.05), Vec3::new(0.05, 0.25, 0.05));

        assert_eq!(game.active_piece().unwrap().position(), Vec3::splat(0.05));
        assert_eq!(recorder.cues(), 0);
    }

    //=====================================================================
    // Locking
    //=====================================================================

    #[test]
    fn double_tap_locks_and_next_tick_respawns() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);
        let first = game.active_piece().unwrap().id();

        tap(&mut game);
        recorder.reset();
        tap(&mut game);

        assert_eq!(locked_signals(&game), 1);
        assert!(game.active_piece().is_none());
        let locked: Vec<_> = recorder
            .colors()
            .into_iter()
            .filter(|(key, _)| key.piece == first)
            .collect();
        assert_eq!(locked.len(), 2);
        assert!(locked.iter().all(|(_, c)| *c == Color::GREEN));

        game.tick(&[], DT);
        let second = game.active_piece().unwrap().id();
        assert_ne!(second, first);
    }

    #[test]
    fn slow_taps_do_not_lock() {
        let (mut game, _) = game();
        game.tick(&[], DT);

        tap(&mut game);
        for _ in 0..40 {
            game.tick(&[], DT);
        }
        tap(&mut game);

        assert_eq!(locked_signals(&game), 0);
        assert!(game.active_piece().is_some());
    }

    #[test]
    fn colliding_piece_refuses_lock() {
        let (mut game, _) = game();
        game.tick(&[], DT);
        tap(&mut game);
        tap(&mut game);
        // respawn on top of the locked domino
        game.tick(&[], DT);
        assert!(game.active_piece().unwrap().is_colliding());

        for _ in 0..40 {
            game.tick(&[], DT);
        }
        tap(&mut game);
        tap(&mut game);

        assert_eq!(locked_signals(&game), 0);
        assert!(game.active_piece().is_some_and(|p| !p.is_locked()));
    }

    #[test]
    fn piece_spawned_inside_locked_piece_can_be_dragged_out() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);
        tap(&mut game);
        tap(&mut game);
        assert_eq!(locked_signals(&game), 1);

        game.tick(&[], DT);
        game.tick(&[], DT);
        assert!(game.active_piece().unwrap().is_colliding());

        drag(&mut game, Vec3::splat(0.05), Vec3::new(0.05, 0.35, 0.05));

        let piece = game.active_piece().unwrap();
        assert!(piece.position().abs_diff_eq(Vec3::new(0.05, 0.35, 0.05), 1e-5));
        assert!(!piece.is_colliding());
        assert_eq!(recorder.cues(), 1);
    }

    //=====================================================================
    // Orbit
    //=====================================================================

    #[test]
    fn swipe_orbits_and_blocks_dragging() {
        let (mut game, recorder) = game();
        game.tick(&[], DT);

        game.tick(&[PointerSample::begin(100.0, 300.0), PointerSample::end(400.0, 300.0)], DT);
        assert!(game.orbit().is_animating());

        drag(&mut game, Vec3::splat(0.05), Vec3::new(0.05, 0.25, 0.05));
        assert_eq!(game.active_piece().unwrap().position(), Vec3::splat(0.05));
        assert_eq!(recorder.cues(), 0);

        for _ in 0..60 {
            game.tick(&[], DT);
        }
        assert!(!game.orbit().is_animating());
        assert!(game.camera().position().abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn dragging_resumes_after_orbit() {
        let (mut game, _) = game();
        game.tick(&[], DT);
        game.tick(&[PointerSample::begin(600.0, 300.0), PointerSample::end(300.0, 300.0)], DT);

        for _ in 0..60 {
            game.tick(&[], DT);
        }
        assert!(!game.orbit().is_animating());
        assert!(game.camera().position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-3));

        // the movement plane now faces +X
        drag(&mut game, Vec3::splat(0.05), Vec3::new(0.05, 0.25, 0.05));
        let position = game.active_piece().unwrap().position();
        assert!(position.abs_diff_eq(Vec3::new(0.05, 0.25, 0.05), 1e-5));
    }

    //=====================================================================
    // Platform Hooks
    //=====================================================================

    #[test]
    fn resize_updates_camera_viewport() {
        let (mut game, _) = game();
        game.set_viewport(UVec2::new(1280, 720));
        assert_eq!(game.camera().viewport(), UVec2::new(1280, 720));
    }

    #[test]
    fn clock_accumulates_tick_deltas() {
        let (mut game, _) = game();
        for _ in 0..30 {
            game.tick(&[], DT);
        }
        assert_eq!(game.tick_count(), 30);
        assert_abs_diff_eq!(game.clock(), 0.5, epsilon = 1e-4);
    }
}
