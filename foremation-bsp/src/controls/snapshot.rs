//! Knob values shared with the audio callback
//!
//! The audio callback is a plain `fn` with no context, so it cannot borrow
//! the board while the control loop holds it mutably. Instead the control
//! loop publishes each smoothed value into a [`KnobSnapshot`] in a `static`,
//! and the callback reads from there:
//!
//! ```ignore
//! static KNOBS: KnobSnapshot = KnobSnapshot::new();
//!
//! fn audio(input: &[&[f32]], output: &mut [&mut [f32]]) {
//!     let gain = KNOBS.get(Ctrl::Barrel);
//!     // ...
//! }
//!
//! board.attach_knob_snapshot(&KNOBS);
//! ```

use portable_atomic::{AtomicU32, Ordering};

use super::AnalogBank;
use crate::pins::Ctrl;

// 0.0_f32 is all zero bits
#[allow(clippy::declare_interior_mutable_const)]
const NEUTRAL: AtomicU32 = AtomicU32::new(0);

/// Latest smoothed knob values, one `f32` per knob stored as its bits
///
/// Each slot is written and read whole, so a read is never torn. A read may
/// be one control cycle stale.
pub struct KnobSnapshot {
    values: [AtomicU32; Ctrl::COUNT],
}

impl KnobSnapshot {
    /// All knobs at 0.0
    pub const fn new() -> Self {
        Self {
            values: [NEUTRAL; Ctrl::COUNT],
        }
    }

    /// Latest published value of a knob
    pub fn get(&self, ctrl: Ctrl) -> f32 {
        f32::from_bits(self.values[ctrl.index()].load(Ordering::Relaxed))
    }

    /// Store every knob's current value
    pub fn publish(&self, bank: &AnalogBank<{ Ctrl::COUNT }>) {
        for (slot, control) in self.values.iter().zip(bank.iter()) {
            slot.store(control.value().to_bits(), Ordering::Relaxed);
        }
    }
}

impl Default for KnobSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
