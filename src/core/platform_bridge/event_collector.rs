//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → samples / viewport → TickControl
//
// Bounded polling prevents starvation. Pointer batches are concatenated
// in arrival order; only the latest resize of a frame is kept.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use glam::UVec2;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::PointerSample;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events for one tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    samples: Vec<PointerSample>,
    viewport: Option<UVec2>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            samples: Vec::with_capacity(32),
            viewport: None,
        }
    }

    /// Drains pending platform events without blocking.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.samples.clear();
        self.viewport = None;
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    info!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Pointer samples collected this frame, in arrival order.
    pub(crate) fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    /// Latest viewport size received this frame.
    pub(crate) fn viewport(&self) -> Option<UVec2> {
        self.viewport
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Pointer(batch) => {
                self.samples.extend(batch);
                TickControl::Continue
            }
            PlatformEvent::Resized { width, height } => {
                self.viewport = Some(UVec2::new(width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
