//! Seed module abstraction
//!
//! The Seed is the microcontroller module the board is built around. It
//! owns the ADC and the audio handle, hands out GPIO pins by header pin
//! number, and provides blocking delays.

use embedded_hal::delay::DelayNs;

use crate::adc::Adc;
use crate::audio::AudioHandle;
use crate::gpio::{InputPin, OutputPin, Pull};

/// Number of header pins on the Seed (D0-D31)
pub const SEED_PIN_COUNT: u8 = 32;

/// Hardware revision of the Seed module
///
/// The revisions differ in which SAI data line is wired to the codec's
/// DAC and which to its ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardVersion {
    /// Original Seed (AK4556 codec)
    #[default]
    Seed,
    /// Seed 1.1 (WM8731 codec)
    Seed1_1,
}

/// The Seed module
pub trait Seed: DelayNs {
    /// Error type for platform operations
    type Error;
    /// Background ADC
    type Adc: Adc<Error = Self::Error>;
    /// Codec streaming handle
    type Audio: AudioHandle<Error = Self::Error>;
    /// Digital input pin
    type Input: InputPin;
    /// Digital output pin
    type Output: OutputPin;

    /// Set up clocks and memory; must run before [`Seed::init`]
    fn configure(&mut self);

    /// Bring up the module peripherals
    ///
    /// `boost` selects the higher CPU clock.
    fn init(&mut self, boost: bool) -> Result<(), Self::Error>;

    /// Detect the module revision
    fn board_version(&self) -> BoardVersion;

    /// Claim a header pin as a digital input
    fn input_pin(&mut self, pin: u8, pull: Pull) -> Result<Self::Input, Self::Error>;

    /// Claim a header pin as a push-pull output
    fn output_pin(&mut self, pin: u8) -> Result<Self::Output, Self::Error>;

    /// The module's ADC
    fn adc(&self) -> &Self::Adc;

    /// The module's ADC, mutably
    fn adc_mut(&mut self) -> &mut Self::Adc;

    /// The module's audio handle
    fn audio(&self) -> &Self::Audio;

    /// The module's audio handle, mutably
    fn audio_mut(&mut self) -> &mut Self::Audio;
}
