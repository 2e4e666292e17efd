//=========================================================================
// Placement Engine
//=========================================================================
//
// Responsibilities:
// - Spawn a piece whenever none is active
// - Run drag sessions (holding the input gate for their duration)
// - Project, snap and validate candidate positions before committing
// - Lock the active piece on double tap when it is collision-free
// - Poll live collision flags of the active piece once per tick
//
// Collaborators are passed in per call: the camera (read-only) and the
// collider registry. Side effects are emitted as `GameSignal`s.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{LockOutcome, MoveOutcome};
use crate::core::camera::Camera;
use crate::core::collision::{ColliderCategory, ColliderRegistry, CollisionOracle};
use crate::core::geometry::{Lattice, Plane};
use crate::core::input::{GateHolder, Gesture, GestureKind, InputGate};
use crate::core::piece::{CatalogSelector, Piece, PieceFactory, PieceId};
use crate::core::signals::{GameSignal, SignalQueue};

//=== PlacementEngine =====================================================

pub struct PlacementEngine {
    lattice: Lattice,
    factory: Box<dyn PieceFactory>,
    selector: Box<dyn CatalogSelector>,
    gate: InputGate,
    active: Option<Piece>,
    locked: Vec<Piece>,
    dragging: bool,
    inert: bool,
}

impl PlacementEngine {
    /// Tolerance when comparing a snapped candidate with the current
    /// position.
    const SAME_POSITION_EPSILON: f32 = 1e-6;

    /// Ray distances closer than this count as the same surface.
    const HIT_TIE_EPSILON: f32 = 1e-4;

    //--- Construction -----------------------------------------------------

    pub fn new(
        lattice: Lattice,
        factory: Box<dyn PieceFactory>,
        selector: Box<dyn CatalogSelector>,
        gate: InputGate,
    ) -> Self {
        Self {
            lattice,
            factory,
            selector,
            gate,
            active: None,
            locked: Vec::new(),
            dragging: false,
            inert: false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn locked_pieces(&self) -> &[Piece] {
        &self.locked
    }

    pub fn locked_piece(&self, id: PieceId) -> Option<&Piece> {
        self.locked.iter().find(|p| p.id() == id)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `true` once spawning failed; no piece will ever be active again.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    //--- Spawning ---------------------------------------------------------

    /// Spawns a piece if none is active. Returns the active piece id.
    ///
    /// A factory error is a configuration defect: it is logged and the
    /// engine stays inert from then on.
    pub fn ensure_piece(
        &mut self,
        colliders: &mut dyn ColliderRegistry,
        signals: &mut SignalQueue,
    ) -> Option<PieceId> {
        if let Some(piece) = &self.active {
            return Some(piece.id());
        }
        if self.inert {
            return None;
        }

        let len = self.factory.catalog_len();
        if len == 0 {
            error!(target: "placement", "Piece catalog is empty; placement disabled");
            self.inert = true;
            return None;
        }

        let index = self.selector.next_index(len);
        match self.factory.spawn(index) {
            Ok(piece) => {
                colliders.sync_piece(&piece);
                signals.push(GameSignal::PieceSpawned {
                    piece: piece.id(),
                    shape: piece.name().to_owned(),
                });
                let id = piece.id();
                self.active = Some(piece);
                Some(id)
            }
            Err(err) => {
                error!(target: "placement", "Failed to spawn catalog entry {}: {}", index, err);
                self.inert = true;
                None
            }
        }
    }

    //--- Hit Test ---------------------------------------------------------

    /// `true` if the pointer ray through `pixel` reaches the active piece
    /// no later than any other piece.
    ///
    /// Ties go to the active piece: a piece spawned inside a locked one
    /// must stay grabbable so it can be dragged out.
    pub fn is_over_active_piece<O>(&self, camera: &Camera, pixel: Vec2, oracle: &O) -> bool
    where
        O: CollisionOracle + ?Sized,
    {
        let Some(piece) = &self.active else {
            return false;
        };

        let ray = camera.screen_point_to_ray(pixel);
        let Some(own) = piece
            .cube_bounds()
            .filter_map(|(_, bounds)| bounds.ray_distance(&ray))
            .min_by(f32::total_cmp)
        else {
            return false;
        };

        match oracle.raycast(&ray, ColliderCategory::PieceCube) {
            Some(hit) if hit.handle.owner != piece.id() => {
                own <= hit.distance + Self::HIT_TIE_EPSILON
            }
            _ => true,
        }
    }

    //--- Gestures ---------------------------------------------------------

    /// Routes one gesture. Swipes and single taps are not ours and are
    /// ignored.
    pub fn handle_gesture(
        &mut self,
        gesture: &Gesture,
        camera: &Camera,
        colliders: &mut dyn ColliderRegistry,
        signals: &mut SignalQueue,
    ) {
        match gesture.kind {
            GestureKind::DragStart => {
                self.begin_drag();
            }
            GestureKind::DragMove => {
                self.drag_to(gesture.end, camera, colliders, signals);
            }
            GestureKind::DragEnd => self.end_drag(),
            GestureKind::DoubleTap => {
                self.try_lock(signals);
            }
            GestureKind::SwipeLeft | GestureKind::SwipeRight | GestureKind::Tap => {}
        }
    }

    /// Opens a drag session and takes the input gate.
    ///
    /// Refused while an orbit holds the gate or without an active piece.
    pub fn begin_drag(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.gate.acquire(GateHolder::Drag) {
            debug!(target: "placement", "Drag ignored: camera is orbiting");
            return false;
        }

        self.dragging = true;
        debug!(target: "placement", "Drag started");
        true
    }

    /// Closes the drag session and releases the gate.
    pub fn end_drag(&mut self) {
        if self.dragging {
            debug!(target: "placement", "Drag ended");
        }
        self.dragging = false;
        self.gate.release(GateHolder::Drag);
    }

    //--- drag_to() --------------------------------------------------------
    //
    // Moves the active piece towards the point under `pixel`:
    //  1. Intersect the pointer ray with the plane through the piece,
    //     facing the camera
    //  2. Snap the hit point to the lattice
    //  3. Reject if any translated cube box overlaps another piece
    //  4. Commit and signal only if the position actually changes
    //
    pub fn drag_to(
        &mut self,
        pixel: Vec2,
        camera: &Camera,
        colliders: &mut dyn ColliderRegistry,
        signals: &mut SignalQueue,
    ) -> MoveOutcome {
        if !self.dragging {
            return MoveOutcome::Ignored;
        }
        let Some(piece) = self.active.as_mut() else {
            return MoveOutcome::Ignored;
        };

        let plane = Plane::from_normal_and_point(camera.forward(), piece.position());
        let ray = camera.screen_point_to_ray(pixel);
        let Some(hit) = plane.intersect(&ray) else {
            debug!(target: "placement", "Pointer ray misses the movement plane");
            return MoveOutcome::Missed;
        };

        let candidate = self.lattice.snap(hit);
        let delta = candidate - piece.position();

        let blocked = piece.cube_bounds().any(|(_, bounds)| {
            let moved = bounds.translated(delta);
            colliders
                .overlap_box(moved.center, moved.half_extents, ColliderCategory::PieceCube)
                .iter()
                .any(|other| other.owner != piece.id())
        });
        if blocked {
            debug!(target: "placement", "Rejected move of {:?} to {}", piece.id(), candidate);
            return MoveOutcome::Rejected;
        }

        if candidate.abs_diff_eq(piece.position(), Self::SAME_POSITION_EPSILON) {
            return MoveOutcome::Unchanged;
        }

        if !piece.move_to(candidate) {
            warn!(target: "placement", "Active piece {:?} refused to move", piece.id());
            return MoveOutcome::Ignored;
        }
        colliders.sync_piece(piece);
        signals.push(GameSignal::MoveAccepted {
            piece: piece.id(),
            position: candidate,
        });
        MoveOutcome::Moved(candidate)
    }

    //--- try_lock() -------------------------------------------------------
    //
    // Locks the active piece unless it is colliding. On success the
    // active reference clears and the next `ensure_piece` spawns.
    //
    pub fn try_lock(&mut self, signals: &mut SignalQueue) -> LockOutcome {
        if self.dragging || self.gate.is_blocked(GateHolder::Drag) {
            return LockOutcome::Busy;
        }
        let Some(piece) = self.active.as_ref() else {
            return LockOutcome::NoPiece;
        };
        if piece.is_colliding() {
            debug!(target: "placement", "Lock of {:?} refused: colliding", piece.id());
            return LockOutcome::Colliding;
        }

        let Some(mut piece) = self.active.take() else {
            return LockOutcome::NoPiece;
        };
        piece.lock();
        let id = piece.id();
        self.locked.push(piece);

        info!(target: "placement", "{} piece(s) locked", self.locked.len());
        signals.push(GameSignal::PieceLocked { piece: id });
        LockOutcome::Locked(id)
    }

    //--- Collision Polling ------------------------------------------------

    /// Refreshes the live collision flags of the active piece.
    pub fn poll_collisions<O: CollisionOracle + ?Sized>(&mut self, oracle: &O) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.poll_collisions(oracle),
            None => false,
        }
    }
}

impl std::fmt::Debug for PlacementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEngine")
            .field("lattice", &self.lattice)
            .field("active", &self.active.as_ref().map(Piece::id))
            .field("locked", &self.locked.len())
            .field("dragging", &self.dragging)
            .field("inert", &self.inert)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::ColliderSet;
    use crate::core::config::GameConfig;
    use crate::core::piece::{CatalogFactory, PieceCatalog, PieceError, PieceShape, SequenceSelector};
    use crate::core::render::Color;
    use glam::{IVec3, Vec3};

    //--- Test Helpers -----------------------------------------------------

    struct Fixture {
        engine: PlacementEngine,
        colliders: ColliderSet,
        camera: Camera,
        gate: InputGate,
        signals: SignalQueue,
    }

    fn domino_catalog() -> PieceCatalog {
        PieceCatalog::new(vec![PieceShape::new(
            "domino",
            vec![IVec3::ZERO, IVec3::X],
            Color::BLUE,
        )])
    }

    fn fixture() -> Fixture {
        let config = GameConfig::default();
        let gate = InputGate::new();
        let factory = CatalogFactory::new(domino_catalog(), config.spawn_position, config.spawn_scale);
        let engine = PlacementEngine::new(
            config.lattice,
            Box::new(factory),
            Box::new(SequenceSelector::new(vec![0])),
            gate.clone(),
        );

        let mut fx = Fixture {
            engine,
            colliders: ColliderSet::new(config.contact_tolerance),
            camera: Camera::from_config(&config.camera, config.pivot),
            gate,
            signals: SignalQueue::new(),
        };
        fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);
        fx
    }

    impl Fixture {
        fn drag_to_world(&mut self, point: Vec3) -> MoveOutcome {
            let pixel = self.camera.world_to_screen(point).expect("point in view");
            self.engine.drag_to(pixel, &self.camera, &mut self.colliders, &mut self.signals)
        }

        fn move_signals(&self) -> usize {
            self.signals.count(|s| matches!(s, GameSignal::MoveAccepted { .. }))
        }

        fn active_position(&self) -> Vec3 {
            self.engine.active().map(Piece::position).expect("active piece")
        }
    }

    struct BrokenFactory;

    impl PieceFactory for BrokenFactory {
        fn catalog_len(&self) -> usize {
            1
        }

        fn spawn(&mut self, _index: usize) -> Result<Piece, PieceError> {
            Err(PieceError::NoCubes { shape: "ghost".into() })
        }
    }

    //=====================================================================
    // Spawning
    //=====================================================================

    #[test]
    fn spawns_at_spawn_point() {
        let fx = fixture();
        assert_eq!(fx.active_position(), Vec3::splat(0.05));
        assert_eq!(fx.colliders.len(), 2);
        assert_eq!(fx.signals.count(|s| matches!(s, GameSignal::PieceSpawned { .. })), 1);
    }

    #[test]
    fn ensure_piece_keeps_existing_piece() {
        let mut fx = fixture();
        let first = fx.engine.active().map(Piece::id);
        let again = fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);
        assert_eq!(again, first);
        assert_eq!(fx.signals.len(), 1);
    }

    #[test]
    fn spawn_failure_makes_engine_inert() {
        let mut engine = PlacementEngine::new(
            Lattice::default(),
            Box::new(BrokenFactory),
            Box::new(SequenceSelector::new(vec![0])),
            InputGate::new(),
        );
        let mut colliders = ColliderSet::new(1e-4);
        let mut signals = SignalQueue::new();

        assert_eq!(engine.ensure_piece(&mut colliders, &mut signals), None);
        assert!(engine.is_inert());
        assert_eq!(engine.ensure_piece(&mut colliders, &mut signals), None);
        assert!(signals.is_empty());
    }

    //=====================================================================
    // Hit Test
    //=====================================================================

    #[test]
    fn hit_test_finds_active_piece() {
        let fx = fixture();
        let on = fx.camera.world_to_screen(Vec3::splat(0.05)).unwrap();
        let off = fx.camera.world_to_screen(Vec3::new(1.0, 1.0, 0.05)).unwrap();

        assert!(fx.engine.is_over_active_piece(&fx.camera, on, &fx.colliders));
        assert!(!fx.engine.is_over_active_piece(&fx.camera, off, &fx.colliders));
    }

    #[test]
    fn hit_test_wins_tie_with_piece_in_same_cell() {
        let mut fx = fixture();
        assert!(matches!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Locked(_)));
        fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);
        fx.engine.poll_collisions(&fx.colliders);
        assert!(fx.engine.active().is_some_and(Piece::is_colliding));

        let on = fx.camera.world_to_screen(Vec3::splat(0.05)).unwrap();
        assert!(fx.engine.is_over_active_piece(&fx.camera, on, &fx.colliders));
    }

    #[test]
    fn hit_test_blocked_by_nearer_piece() {
        let mut fx = fixture();
        let shape = PieceShape::new("blocker", vec![IVec3::ZERO], Color::RED);
        let blocker = Piece::new(PieceId(99), &shape, Vec3::new(0.05, 0.05, 0.55), 0.1).unwrap();
        fx.colliders.sync_piece(&blocker);

        let on = fx.camera.world_to_screen(Vec3::splat(0.05)).unwrap();
        assert!(!fx.engine.is_over_active_piece(&fx.camera, on, &fx.colliders));
    }

    //=====================================================================
    // Dragging
    //=====================================================================

    #[test]
    fn drag_snaps_to_lattice() {
        let mut fx = fixture();
        assert!(fx.engine.begin_drag());

        let outcome = fx.drag_to_world(Vec3::new(0.13, 0.07, 0.05));

        assert_eq!(outcome, MoveOutcome::Moved(fx.active_position()));
        assert!(fx.active_position().abs_diff_eq(Vec3::new(0.15, 0.05, 0.05), 1e-5));
        assert_eq!(fx.move_signals(), 1);
    }

    #[test]
    fn same_cell_emits_no_signal() {
        let mut fx = fixture();
        fx.engine.begin_drag();

        let outcome = fx.drag_to_world(Vec3::new(0.06, 0.04, 0.05));

        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(fx.move_signals(), 0);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut fx = fixture();
        assert_eq!(fx.drag_to_world(Vec3::new(0.35, 0.05, 0.05)), MoveOutcome::Ignored);
        assert_eq!(fx.active_position(), Vec3::splat(0.05));
    }

    #[test]
    fn drag_holds_and_releases_gate() {
        let mut fx = fixture();
        fx.engine.begin_drag();
        assert!(fx.gate.is_blocked(GateHolder::Orbit));

        fx.engine.end_drag();
        assert!(!fx.gate.is_held_by(GateHolder::Drag));
        assert!(!fx.engine.is_dragging());
    }

    #[test]
    fn drag_refused_while_orbiting() {
        let mut fx = fixture();
        fx.gate.acquire(GateHolder::Orbit);

        assert!(!fx.engine.begin_drag());
        assert_eq!(fx.drag_to_world(Vec3::new(0.35, 0.05, 0.05)), MoveOutcome::Ignored);
    }

    #[test]
    fn piece_behind_camera_misses_plane() {
        let mut fx = fixture();
        fx.engine.begin_drag();

        // Looking down -Z from behind the play volume.
        let away = Camera::new(Vec3::new(0.0, 0.0, -5.0), 60.0, glam::UVec2::new(800, 600));

        let centre = Vec2::new(400.0, 300.0);
        let outcome = fx.engine.drag_to(centre, &away, &mut fx.colliders, &mut fx.signals);
        assert_eq!(outcome, MoveOutcome::Missed);
        assert_eq!(fx.active_position(), Vec3::splat(0.05));
    }

    //=====================================================================
    // Locking
    //=====================================================================

    #[test]
    fn double_tap_locks_and_respawns_next_tick() {
        let mut fx = fixture();
        let first = fx.engine.active().map(Piece::id).unwrap();

        assert_eq!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Locked(first));
        assert!(fx.engine.active().is_none());
        assert!(fx.engine.locked_piece(first).is_some_and(Piece::is_locked));

        let second = fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals).unwrap();
        assert_ne!(second, first);
    }

    #[test]
    fn colliding_piece_cannot_lock() {
        let mut fx = fixture();
        let first = fx.engine.active().map(Piece::id).unwrap();
        fx.engine.try_lock(&mut fx.signals);

        // New piece spawns on top of the locked one.
        fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);
        assert!(fx.engine.poll_collisions(&fx.colliders));

        assert_eq!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Colliding);
        assert!(fx.engine.active().is_some_and(|p| !p.is_locked()));
        assert_eq!(fx.engine.locked_pieces().len(), 1);
        assert_eq!(fx.engine.locked_pieces()[0].id(), first);
    }

    #[test]
    fn lock_refused_during_drag() {
        let mut fx = fixture();
        fx.engine.begin_drag();
        assert_eq!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Busy);
    }

    #[test]
    fn lock_refused_while_orbiting() {
        let mut fx = fixture();
        fx.gate.acquire(GateHolder::Orbit);
        assert_eq!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Busy);
    }

    //=====================================================================
    // End to End
    //=====================================================================

    #[test]
    fn rejected_then_accepted_move() {
        let mut fx = fixture();

        // Park the first domino at x = 0.45..0.55 and lock it.
        fx.engine.begin_drag();
        assert!(matches!(fx.drag_to_world(Vec3::new(0.45, 0.05, 0.05)), MoveOutcome::Moved(_)));
        fx.engine.end_drag();
        fx.engine.poll_collisions(&fx.colliders);
        assert!(matches!(fx.engine.try_lock(&mut fx.signals), LockOutcome::Locked(_)));

        fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);
        fx.signals.clear();
        assert_eq!(fx.active_position(), Vec3::splat(0.05));

        // Candidate cells x = 0.35, 0.45: the second overlaps the locked piece.
        fx.engine.begin_drag();
        assert_eq!(fx.drag_to_world(Vec3::new(0.35, 0.05, 0.05)), MoveOutcome::Rejected);
        assert_eq!(fx.active_position(), Vec3::splat(0.05));
        assert_eq!(fx.move_signals(), 0);

        // Free cell above.
        assert!(matches!(fx.drag_to_world(Vec3::new(0.05, 0.25, 0.05)), MoveOutcome::Moved(_)));
        assert!(fx.active_position().abs_diff_eq(Vec3::new(0.05, 0.25, 0.05), 1e-5));
        assert_eq!(fx.move_signals(), 1);
    }

    #[test]
    fn face_adjacent_placement_is_allowed() {
        let mut fx = fixture();
        fx.engine.try_lock(&mut fx.signals);
        fx.engine.ensure_piece(&mut fx.colliders, &mut fx.signals);

        // Directly above the locked domino, sharing a face.
        fx.engine.begin_drag();
        let outcome = fx.drag_to_world(Vec3::new(0.05, 0.15, 0.05));
        assert!(matches!(outcome, MoveOutcome::Moved(_)));

        fx.engine.poll_collisions(&fx.colliders);
        assert!(fx.engine.active().is_some_and(|p| !p.is_colliding()));
    }
}
