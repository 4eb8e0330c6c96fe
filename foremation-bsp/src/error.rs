//! Board error type

use crate::pins::PinError;

/// Errors reported by the board façade
///
/// `E` is the platform's error type; platform failures are passed through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError<E> {
    /// The platform rejected an operation
    Platform(E),
    /// `init` was called on a board that is already configured
    AlreadyInitialized,
    /// Operation needs a configured board
    NotInitialized,
    /// An earlier `init` failed partway; the platform must be reset
    InitFailed,
    /// The ADC came up with a different number of channels than knobs
    AdcChannels(usize),
    /// A pin appears more than once in the pin map
    PinConflict(u8),
    /// A pin number does not exist on the Seed
    InvalidPin(u8),
    /// Knob index outside the control table
    InvalidControl(usize),
    /// Switch index outside the switch table
    InvalidSwitch(usize),
    /// LED index outside the LED table
    InvalidLed(usize),
}

impl<E> From<PinError> for BoardError<E> {
    fn from(err: PinError) -> Self {
        match err {
            PinError::Conflict(pin) => BoardError::PinConflict(pin),
            PinError::Invalid(pin) => BoardError::InvalidPin(pin),
        }
    }
}
