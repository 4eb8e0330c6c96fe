//! Panel controls
//!
//! - [`analog`] - smoothed knob readers
//! - [`switch`] - debounced switches
//! - [`led`] - indicator outputs
//! - [`snapshot`] - knob values shared with the audio callback

pub mod analog;
pub mod led;
pub mod snapshot;
pub mod switch;

pub use analog::{AnalogBank, AnalogControl};
pub use led::{Led, LedBank};
pub use snapshot::KnobSnapshot;
pub use switch::{Polarity, Switch, SwitchBank, SwitchType};
