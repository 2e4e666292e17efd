//=========================================================================
// Orbit Camera
//=========================================================================
//
// Discrete 90° orbits of the camera around a fixed pivot.
//
// A swipe starts an animation that rotates the camera about its own up
// axis at a constant angular speed. The animation is persisted progress
// state advanced once per tick; it never blocks the tick loop.
//
// Invariants:
// - At most one animation runs; requests received while animating are
//   dropped, not queued.
// - The input gate is held for exactly the lifetime of an animation.
// - The final pose is the precomputed end pose, never the accumulated
//   interpolation, and the camera re-aims at the pivot.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::Camera;
use crate::core::config::GameConfig;
use crate::core::input::{GateHolder, Gesture, GestureKind, InputGate};
use crate::core::signals::{GameSignal, SignalQueue};

//=== OrbitDirection ======================================================

/// Direction of a discrete orbit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitDirection {
    /// Swipe left: +90° about the camera up axis.
    Left,

    /// Swipe right: -90° about the camera up axis.
    Right,
}

impl OrbitDirection {
    const STEP_DEGREES: f32 = 90.0;

    pub fn from_gesture(kind: GestureKind) -> Option<Self> {
        match kind {
            GestureKind::SwipeLeft => Some(Self::Left),
            GestureKind::SwipeRight => Some(Self::Right),
            _ => None,
        }
    }

    /// Signed rotation angle in radians.
    pub fn angle(self) -> f32 {
        match self {
            Self::Left => Self::STEP_DEGREES.to_radians(),
            Self::Right => -Self::STEP_DEGREES.to_radians(),
        }
    }
}

//=== OrbitAnimation ======================================================

/// In-flight orbit: start and end poses plus elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAnimation {
    direction: OrbitDirection,
    axis: Vec3,
    start_rotation: Quat,
    start_position: Vec3,
    end_rotation: Quat,
    end_position: Vec3,
    duration: f32,
    elapsed: f32,
}

impl OrbitAnimation {
    fn new(camera: &Camera, pivot: Vec3, direction: OrbitDirection, degrees_per_second: f32) -> Self {
        let axis = camera.up();
        let angle = direction.angle();
        let step = Quat::from_axis_angle(axis, angle);

        Self {
            direction,
            axis,
            start_rotation: camera.rotation(),
            start_position: camera.position(),
            end_rotation: (step * camera.rotation()).normalize(),
            end_position: pivot + step * (camera.position() - pivot),
            duration: angle.abs().to_degrees() / degrees_per_second,
            elapsed: 0.0,
        }
    }

    pub fn direction(&self) -> OrbitDirection {
        self.direction
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn end_pose(&self) -> (Vec3, Quat) {
        (self.end_position, self.end_rotation)
    }

    /// Pose at the current progress, relative to `pivot`.
    fn pose(&self, pivot: Vec3) -> (Vec3, Quat) {
        let t = self.progress();
        let partial = Quat::from_axis_angle(self.axis, self.direction.angle() * t);
        let position = pivot + partial * (self.start_position - pivot);
        let rotation = self.start_rotation.slerp(self.end_rotation, t);
        (position, rotation)
    }
}

//=== OrbitCamera =========================================================

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    camera: Camera,
    pivot: Vec3,
    degrees_per_second: f32,
    gate: InputGate,
    animation: Option<OrbitAnimation>,
}

impl OrbitCamera {
    //--- Construction -----------------------------------------------------

    pub fn new(camera: Camera, pivot: Vec3, degrees_per_second: f32, gate: InputGate) -> Self {
        Self {
            camera,
            pivot,
            degrees_per_second,
            gate,
            animation: None,
        }
    }

    /// Camera placed per `config.camera`, aimed at `config.pivot`.
    pub fn from_config(config: &GameConfig, gate: InputGate) -> Self {
        let camera = Camera::from_config(&config.camera, config.pivot);
        Self::new(camera, config.pivot, config.orbit_degrees_per_second, gate)
    }

    //--- Queries ----------------------------------------------------------

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&OrbitAnimation> {
        self.animation.as_ref()
    }

    //--- Requests ---------------------------------------------------------

    /// Routes a gesture. Only swipes are consumed; returns `true` if an
    /// animation was started.
    pub fn handle_gesture(&mut self, gesture: &Gesture, signals: &mut SignalQueue) -> bool {
        match OrbitDirection::from_gesture(gesture.kind) {
            Some(direction) => self.request(direction, signals),
            None => false,
        }
    }

    /// Starts an orbit step.
    ///
    /// Dropped (returns `false`) while another orbit is running or while
    /// a drag holds the input gate.
    pub fn request(&mut self, direction: OrbitDirection, signals: &mut SignalQueue) -> bool {
        if self.is_animating() {
            debug!(target: "camera", "Dropped {:?} orbit: already animating", direction);
            return false;
        }
        if !self.gate.acquire(GateHolder::Orbit) {
            debug!(target: "camera", "Dropped {:?} orbit: input gate held by drag", direction);
            return false;
        }

        let animation = OrbitAnimation::new(&self.camera, self.pivot, direction, self.degrees_per_second);
        info!(
            target: "camera",
            "Orbit {:?} started ({:.2}s)",
            direction,
            animation.duration()
        );

        self.animation = Some(animation);
        signals.push(GameSignal::OrbitStarted { direction });
        true
    }

    //--- advance() --------------------------------------------------------
    //
    // Advances the running animation by `dt` seconds and applies the
    // interpolated pose. On completion, snaps to the end pose, re-aims at
    // the pivot, releases the gate and returns to idle.
    //
    pub fn advance(&mut self, dt: f32, signals: &mut SignalQueue) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        animation.elapsed += dt.max(0.0);

        if animation.progress() < 1.0 {
            let (position, rotation) = animation.pose(self.pivot);
            self.camera.set_pose(position, rotation);
            return;
        }

        let (position, rotation) = animation.end_pose();
        self.camera.set_pose(position, rotation);
        let up = self.camera.up();
        self.camera.look_at(self.pivot, up);

        self.animation = None;
        self.gate.release(GateHolder::Orbit);

        info!(target: "camera", "Orbit finished at {}", position);
        signals.push(GameSignal::OrbitFinished);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
