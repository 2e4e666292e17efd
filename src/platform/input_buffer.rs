//=========================================================================
// Input Buffer
//
// Collects pointer samples between two frame boundaries.
//
// Responsibilities:
// - Store samples in arrival order
// - Coalesce consecutive moves (latest position wins)
// - Hand the frame's samples over via `drain()`
//
// Notes:
// Presses and releases are never merged or reordered: a move between a
// press and a release survives, so a drag cannot collapse into a tap.
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::PointerSample;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    samples: Vec<PointerSample>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const SAMPLES_BASE: usize = 32;

        Self {
            samples: Vec::with_capacity(SAMPLES_BASE),
        }
    }

    //--- push() -----------------------------------------------------------
    //
    // Appends a sample, replacing the previous one when both are moves.
    //
    pub(crate) fn push(&mut self, sample: PointerSample) {
        match self.samples.last_mut() {
            Some(last) if last.coalesces_with(&sample) => *last = sample,
            _ => self.samples.push(sample),
        }
    }

    //--- drain() ----------------------------------------------------------
    //
    // Returns this frame's samples, or `None` if nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<PointerSample>> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.drain(..).collect())
    }

    //--- Test Accessors ---------------------------------------------------
    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
