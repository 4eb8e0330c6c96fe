//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by the platform, plus adapters for `embedded-hal` 1.0 pins.

use core::convert::Infallible;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Internal pull resistor configuration for an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Pulled to VDD
    Up,
    /// Pulled to ground
    Down,
}

/// Digital output pin
///
/// Outputs are write-only from the board layer's point of view.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Takes `&mut self` because some platforms need mutable access to sample
/// the input register.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Adapter for an infallible `embedded-hal` output pin
///
/// Embassy and most HAL crates use `Infallible` as the GPIO error type, so
/// the adapter never has to drop an error.
pub struct EhOutput<P>(pub P);

impl<P> OutputPin for EhOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

/// Adapter for an infallible `embedded-hal` input pin
pub struct EhInput<P>(pub P);

impl<P> InputPin for EhInput<P>
where
    P: embedded_hal::digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        match self.0.is_high() {
            Ok(high) => high,
            Err(never) => match never {},
        }
    }
}
