//=========================================================================
// Input Gate
//
// Mutual exclusion between camera rotation and piece dragging.
//
// The orbit camera holds the gate while animating and the placement
// engine holds it while a drag is open. A holder blocks the *other*
// subsystem's gesture handling only; it never blocks itself.
//
// The gate is shared by cloning. Each subsystem receives its handle once
// at construction.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//=== GateHolder ==========================================================

/// The two subsystems that can hold the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateHolder {
    Orbit,
    Drag,
}

impl GateHolder {
    fn other(self) -> Self {
        match self {
            Self::Orbit => Self::Drag,
            Self::Drag => Self::Orbit,
        }
    }
}

//=== InputGate ===========================================================

#[derive(Debug, Default)]
struct GateFlags {
    orbit: AtomicBool,
    drag: AtomicBool,
}

impl GateFlags {
    fn flag(&self, holder: GateHolder) -> &AtomicBool {
        match holder {
            GateHolder::Orbit => &self.orbit,
            GateHolder::Drag => &self.drag,
        }
    }
}

/// Shared "input disabled" gate.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    flags: Arc<GateFlags>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the gate for `holder`.
    ///
    /// Fails (returns `false`) if the other subsystem currently holds it.
    /// Re-acquiring an already held gate succeeds.
    pub fn acquire(&self, holder: GateHolder) -> bool {
        if self.is_blocked(holder) {
            return false;
        }
        self.flags.flag(holder).store(true, Ordering::Release);
        true
    }

    /// Releases the gate for `holder`. No-op if not held.
    pub fn release(&self, holder: GateHolder) {
        self.flags.flag(holder).store(false, Ordering::Release);
    }

    /// Returns `true` if `holder` currently holds the gate.
    pub fn is_held_by(&self, holder: GateHolder) -> bool {
        self.flags.flag(holder).load(Ordering::Acquire)
    }

    /// Returns `true` if gestures for `holder` are suppressed.
    pub fn is_blocked(&self, holder: GateHolder) -> bool {
        self.is_held_by(holder.other())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
