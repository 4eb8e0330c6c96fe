//! Indicator LEDs
//!
//! The pitch-range indicator shows one position at a time. The bank only
//! offers clear-all and light-one, so no sequence of calls can leave more
//! than one LED lit.

use heapless::Vec;

use foremation_hal::gpio::OutputPin;

/// A single LED output
pub struct Led<P> {
    pin: P,
    /// If true, LED on = pin LOW
    inverted: bool,
}

impl<P: OutputPin> Led<P> {
    /// Create an LED output; the LED starts off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self { pin, inverted };
        led.set(false);
        led
    }

    /// Create an LED driven high to light
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Drive the LED on or off
    pub fn set(&mut self, on: bool) {
        self.pin.set_state(on != self.inverted);
    }
}

/// Fixed bank of LEDs with at most one lit
pub struct LedBank<P, const N: usize> {
    leds: Vec<Led<P>, N>,
}

impl<P: OutputPin, const N: usize> Default for LedBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Empty bank; filled by the board at init
    pub fn new() -> Self {
        Self { leds: Vec::new() }
    }

    /// Wrap the given LEDs and turn them all off
    pub fn from_leds(leds: Vec<Led<P>, N>) -> Self {
        let mut bank = Self { leds };
        bank.clear();
        bank
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        for led in self.leds.iter_mut() {
            led.set(false);
        }
    }

    /// Turn every LED off, then light LED `index`
    ///
    /// Returns false and leaves the outputs untouched if `index` is not
    /// in the bank.
    pub fn set_one(&mut self, index: usize) -> bool {
        if index >= self.leds.len() {
            return false;
        }
        self.clear();
        self.leds[index].set(true);
        true
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }
}
