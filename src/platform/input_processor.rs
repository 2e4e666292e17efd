//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit mouse and touch events into pointer samples.
//
// Architecture:
//   winit events → InputProcessor → PointerSample → InputBuffer
//
// Stateful tracking: the last cursor position (mouse button events carry
// none), whether the left button is down, and which finger owns the
// pointer. Only the first finger down is followed; others are ignored
// until it lifts. A cancelled touch ends the press.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase};

//=== Internal Dependencies ===============================================

use crate::core::input::{PointerPhase, PointerSample};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    cursor: Vec2,
    mouse_pressed: bool,
    active_touch: Option<u64>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: Vec2::ZERO,
            mouse_pressed: false,
            active_touch: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Vec2 {
        self.cursor
    }

    //--- Mouse ------------------------------------------------------------

    /// Cursor moved (physical pixels).
    pub(crate) fn process_cursor_moved(&mut self, x: f32, y: f32) -> PointerSample {
        self.cursor = Vec2::new(x, y);
        PointerSample::moved(x, y)
    }

    /// Left button press/release at the last cursor position. Other
    /// buttons and repeated states are filtered.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerSample> {
        if button != MouseButton::Left {
            return None;
        }

        let phase = match (state, self.mouse_pressed) {
            (ElementState::Pressed, false) => PointerPhase::Begin,
            (ElementState::Released, true) => PointerPhase::End,
            _ => return None,
        };

        self.mouse_pressed = phase == PointerPhase::Begin;
        Some(PointerSample {
            position: self.cursor,
            phase,
        })
    }

    //--- Touch ------------------------------------------------------------

    /// Touch event of finger `id` at `(x, y)`.
    pub(crate) fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
    ) -> Option<PointerSample> {
        match phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(id);
                Some(PointerSample::begin(x, y))
            }
            TouchPhase::Moved if self.active_touch == Some(id) => Some(PointerSample::moved(x, y)),
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(id) => {
                self.active_touch = None;
                Some(PointerSample::end(x, y))
            }
            _ => None,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn cursor_move_is_tracked() {
        let mut processor = InputProcessor::new();
        let sample = processor.process_cursor_moved(123.5, 456.75);

        assert_eq!(sample, PointerSample::moved(123.5, 456.75));
        assert_eq!(processor.cursor(), Vec2::new(123.5, 456.75));
    }

    #[test]
    fn left_press_uses_last_cursor_position() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(10.0, 20.0);

        let down = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(down, Some(PointerSample::begin(10.0, 20.0)));

        processor.process_cursor_moved(30.0, 20.0);
        let up = processor.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(up, Some(PointerSample::end(30.0, 20.0)));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn release_without_press_is_filtered() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Released),
            None
        );
    }

    #[test]
    fn repeated_press_is_filtered() {
        let mut processor = InputProcessor::new();
        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            None
        );
    }

    //=====================================================================
    // Touch
    //=====================================================================

    #[test]
    fn first_finger_owns_pointer() {
        let mut processor = InputProcessor::new();

        assert_eq!(
            processor.process_touch(1, TouchPhase::Started, 5.0, 5.0),
            Some(PointerSample::begin(5.0, 5.0))
        );
        assert_eq!(processor.process_touch(2, TouchPhase::Started, 50.0, 50.0), None);
        assert_eq!(processor.process_touch(2, TouchPhase::Moved, 60.0, 50.0), None);
        assert_eq!(
            processor.process_touch(1, TouchPhase::Moved, 8.0, 5.0),
            Some(PointerSample::moved(8.0, 5.0))
        );
        assert_eq!(
            processor.process_touch(1, TouchPhase::Ended, 9.0, 5.0),
            Some(PointerSample::end(9.0, 5.0))
        );
    }

    #[test]
    fn cancelled_touch_ends_press() {
        let mut processor = InputProcessor::new();
        processor.process_touch(7, TouchPhase::Started, 0.0, 0.0);

        assert_eq!(
            processor.process_touch(7, TouchPhase::Cancelled, 1.0, 1.0),
            Some(PointerSample::end(1.0, 1.0))
        );
        // a new finger can take over
        assert!(processor.process_touch(8, TouchPhase::Started, 2.0, 2.0).is_some());
    }
}
