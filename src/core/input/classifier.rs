//=========================================================================
// Gesture Classifier
//
// Turns a serialized pointer stream into semantic gestures.
//
// Rules:
// - Swipe: on release, the press-to-release delta is longer than
//   `min_swipe_distance` and horizontal-dominant. Positive x is right.
// - Drag: a press that started over the active piece and then moved more
//   than `min_drag_distance` opens a session (`DragStart` + `DragMove`).
//   Later moves emit `DragMove`; release emits `DragEnd`.
// - Tap: a press released without dragging or swiping is a tap
//   candidate. If the previous candidate was pressed no more than
//   `max_click_interval` earlier, the release emits `DoubleTap` and both
//   candidates are consumed; otherwise it emits `Tap` and becomes the
//   pending candidate. A drag or a swipe discards the pending candidate.
//
// Only one session is open at a time. Samples are handled strictly in
// arrival order.
//
//=========================================================================

//=== External Crates =====================================================

use glam::Vec2;
use log::{debug, trace};

//=== Internal Modules ====================================================

use super::event::{Gesture, GestureKind, PointerPhase, PointerSample};
use crate::core::config::GameConfig;

//=== Press ===============================================================

/// An open press (pointer held down).
#[derive(Debug, Clone, Copy)]
struct Press {
    start: Vec2,
    pressed_at: f32,
    over_piece: bool,
    dragging: bool,
}

//=== GestureClassifier ===================================================

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    min_swipe_distance: f32,
    max_click_interval: f32,
    min_drag_distance: f32,
    press: Option<Press>,
    pending_tap: Option<f32>,
}

impl GestureClassifier {
    //--- Construction -----------------------------------------------------

    pub fn new(min_swipe_distance: f32, max_click_interval: f32, min_drag_distance: f32) -> Self {
        Self {
            min_swipe_distance,
            max_click_interval,
            min_drag_distance,
            press: None,
            pending_tap: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.min_swipe_distance,
            config.max_click_interval,
            config.min_drag_distance,
        )
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// Returns `true` while the pointer is held down.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    //--- feed() -----------------------------------------------------------
    //
    // Classifies one sample at game time `now`. `over_piece` is only
    // consulted on `Begin` and reports whether the screen point lies on
    // the active piece. Recognised gestures are appended to `out`.
    //
    pub fn feed<F>(&mut self, sample: PointerSample, now: f32, over_piece: F, out: &mut Vec<Gesture>)
    where
        F: FnOnce(Vec2) -> bool,
    {
        trace!(target: "input::gesture", "Sample {:?} at {:.3}s", sample, now);

        match sample.phase {
            PointerPhase::Begin => self.on_begin(sample.position, now, over_piece(sample.position), out),
            PointerPhase::Move => self.on_move(sample.position, now, out),
            PointerPhase::End => self.on_end(sample.position, now, out),
        }
    }

    //--- Phase Handlers ---------------------------------------------------

    fn on_begin(&mut self, at: Vec2, now: f32, over_piece: bool, out: &mut Vec<Gesture>) {
        // A press without a release: close whatever was open.
        if let Some(stale) = self.press.take() {
            if stale.dragging {
                out.push(gesture(GestureKind::DragEnd, stale.start, at, now));
            }
        }

        self.press = Some(Press {
            start: at,
            pressed_at: now,
            over_piece,
            dragging: false,
        });
    }

    fn on_move(&mut self, at: Vec2, now: f32, out: &mut Vec<Gesture>) {
        let Some(press) = self.press.as_mut() else {
            return;
        };

        if press.dragging {
            out.push(gesture(GestureKind::DragMove, press.start, at, now));
            return;
        }

        if press.over_piece && at.distance(press.start) > self.min_drag_distance {
            press.dragging = true;
            self.pending_tap = None;
            debug!(target: "input::gesture", "Drag started at {}", press.start);
            out.push(gesture(GestureKind::DragStart, press.start, at, now));
            out.push(gesture(GestureKind::DragMove, press.start, at, now));
        }
    }

    fn on_end(&mut self, at: Vec2, now: f32, out: &mut Vec<Gesture>) {
        let Some(press) = self.press.take() else {
            return;
        };

        if press.dragging {
            out.push(gesture(GestureKind::DragEnd, press.start, at, now));
            return;
        }

        if let Some(kind) = self.swipe_direction(at - press.start) {
            self.pending_tap = None;
            debug!(target: "input::gesture", "{:?} ({} -> {})", kind, press.start, at);
            out.push(gesture(kind, press.start, at, now));
            return;
        }

        match self.pending_tap.take() {
            Some(first) if press.pressed_at - first <= self.max_click_interval => {
                debug!(
                    target: "input::gesture",
                    "Double tap ({:.3}s apart)",
                    press.pressed_at - first
                );
                out.push(gesture(GestureKind::DoubleTap, press.start, at, now));
            }
            _ => {
                self.pending_tap = Some(press.pressed_at);
                out.push(gesture(GestureKind::Tap, press.start, at, now));
            }
        }
    }

    fn swipe_direction(&self, delta: Vec2) -> Option<GestureKind> {
        if delta.length() <= self.min_swipe_distance || delta.x.abs() <= delta.y.abs() {
            return None;
        }
        if delta.x > 0.0 {
            Some(GestureKind::SwipeRight)
        } else {
            Some(GestureKind::SwipeLeft)
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

fn gesture(kind: GestureKind, start: Vec2, end: Vec2, timestamp: f32) -> Gesture {
    Gesture { kind, start, end, timestamp }
}

//=========================================================================
// Unit Tests
//=========================================================================
