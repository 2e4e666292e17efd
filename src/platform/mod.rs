//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the core thread via a crossbeam
// channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  EventCollector  │
//  │   ├─ mouse → samples     │    │  ↓               │
//  │   └─ first finger only   │    │  Game::tick      │
//  │   ↓                      │    │                  │
//  │  InputBuffer             │    │                  │
//  │   └─ moves coalesced     │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered samples sent as one batch
//    → Core ticks at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: keeps press/move/release order
//   intact even at high event rates
// - **Graceful channel disconnect**: if the core thread dies, the platform
//   logs a warning and keeps running so the window can still be closed
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use glam::UVec2;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::PointerSample;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and pointer event aggregator.
///
/// Runs on the main thread and sends batched samples to the core thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, title, size)`
/// 2. **Execution**: `platform.run()` starts the event loop
/// 3. **Event processing**: winit calls the `ApplicationHandler` methods
/// 4. **Shutdown**: user closes window → sends `WindowClosed` → exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    title: String,
    initial_size: UVec2,

    /// Buffers samples until the frame boundary.
    buffer: InputBuffer,

    /// Channel to the core thread.
    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform; the window is created lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, title: impl Into<String>, size: UVec2) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: title.into(),
            initial_size: size,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_sample(&mut self, sample: Option<PointerSample>) {
        if let Some(sample) = sample {
            trace!(target: "platform::input", "{:?}", sample);
            self.buffer.push(sample);
        }
    }

    /// Sends a message to the core, logging if it has gone away.
    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Channel disconnected, core thread is gone");
        }
    }

    /// Flushes buffered samples to the core thread. Called on every
    /// `RedrawRequested`; empty buffers are not sent.
    fn flush_input_buffer(&mut self) {
        if let Some(samples) = self.buffer.drain() {
            trace!(target: "platform::input", "Flushing {} pointer samples", samples.len());
            let count = samples.len();
            if self.event_sender.send(PlatformEvent::Pointer(samples)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} samples",
                    count
                );
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.initial_size.x, self.initial_size.y));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.send(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.send(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let sample = self
                    .input_processor
                    .process_cursor_moved(position.x as f32, position.y as f32);
                self.push_sample(Some(sample));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let sample = self.input_processor.process_mouse_button(button, state);
                self.push_sample(sample);
            }

            WindowEvent::Touch(touch) => {
                let sample = self.input_processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                );
                self.push_sample(sample);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, "test", UVec2::new(800, 600)), rx)
    }

    #[test]
    fn platform_creation() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_samples_in_order() {
        let (mut platform, rx) = platform();

        platform.push_sample(Some(PointerSample::begin(1.0, 1.0)));
        platform.push_sample(None);
        platform.push_sample(Some(PointerSample::end(1.0, 1.0)));
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Pointer(samples)) => {
                assert_eq!(
                    samples,
                    vec![PointerSample::begin(1.0, 1.0), PointerSample::end(1.0, 1.0)]
                );
            }
            other => panic!("Expected Pointer event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx) = platform();
        platform.push_sample(Some(PointerSample::begin(0.0, 0.0)));

        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (mut platform, rx) = platform();
        platform.push_sample(Some(PointerSample::begin(0.0, 0.0)));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }
}
