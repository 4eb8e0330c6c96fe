//! Audio streaming abstractions
//!
//! Describes the serial audio interface (SAI) wiring of a codec and the
//! audio handle that streams blocks to and from it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SAI peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SaiPeripheral {
    /// SAI1 (on-module codec)
    #[default]
    Sai1,
    /// SAI2 (expansion codec)
    Sai2,
}

/// Audio sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleRate {
    Khz8,
    Khz16,
    Khz32,
    #[default]
    Khz48,
    Khz96,
}

impl SampleRate {
    /// Sample rate in Hz
    pub const fn hz(&self) -> u32 {
        match self {
            SampleRate::Khz8 => 8_000,
            SampleRate::Khz16 => 16_000,
            SampleRate::Khz32 => 32_000,
            SampleRate::Khz48 => 48_000,
            SampleRate::Khz96 => 96_000,
        }
    }
}

/// Sample word size on the SAI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitDepth {
    Bits16,
    #[default]
    Bits24,
    Bits32,
}

/// Clock role of an SAI sub-block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockRole {
    /// Generates the bit and frame clocks
    #[default]
    Master,
    /// Follows the other sub-block's clocks
    Slave,
}

/// Data direction of an SAI sub-block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Samples flow to the codec (DAC)
    #[default]
    Transmit,
    /// Samples flow from the codec (ADC)
    Receive,
}

/// STM32 GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Port {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

/// A microcontroller pin given as port + number (e.g. PE2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortPin {
    pub port: Port,
    pub num: u8,
}

impl PortPin {
    pub const fn new(port: Port, num: u8) -> Self {
        Self { port, num }
    }
}

/// SAI pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaiPins {
    /// Master clock
    pub mclk: PortPin,
    /// Bit clock
    pub sck: PortPin,
    /// Frame sync
    pub fs: PortPin,
    /// Sub-block A data line
    pub sa: PortPin,
    /// Sub-block B data line
    pub sb: PortPin,
}

/// Serial audio interface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaiConfig {
    pub periph: SaiPeripheral,
    pub sample_rate: SampleRate,
    pub bit_depth: BitDepth,
    pub a_sync: ClockRole,
    pub b_sync: ClockRole,
    pub a_dir: Direction,
    pub b_dir: Direction,
    pub pins: SaiPins,
}

/// Audio handle configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioConfig {
    /// Samples per channel per callback
    pub block_size: usize,
    /// Stream sample rate
    pub sample_rate: SampleRate,
    /// Gain applied to the output after the callback returns
    pub post_gain: f32,
}

/// Per-block audio callback
///
/// Called by the platform once per block with one slice per channel.
pub type AudioCallback = fn(input: &[&[f32]], output: &mut [&mut [f32]]);

/// Codec streaming handle
pub trait AudioHandle {
    /// Error type for audio operations
    type Error;

    /// Prepare the handle for the given SAI wiring
    ///
    /// Does not start streaming.
    fn init(&mut self, config: &AudioConfig, sai: &SaiConfig) -> Result<(), Self::Error>;

    /// Start streaming, calling `callback` once per block
    fn start(&mut self, callback: AudioCallback) -> Result<(), Self::Error>;

    /// Swap the callback without stopping the stream
    fn change_callback(&mut self, callback: AudioCallback) -> Result<(), Self::Error>;

    /// Stop streaming
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Change the stream sample rate
    fn set_sample_rate(&mut self, rate: SampleRate) -> Result<(), Self::Error>;

    /// Current sample rate in Hz
    fn sample_rate(&self) -> f32;

    /// Change the number of samples per channel per callback
    fn set_block_size(&mut self, size: usize) -> Result<(), Self::Error>;

    /// Current samples per channel per callback
    fn block_size(&self) -> usize;

    /// Rate in Hz at which the callback runs
    fn callback_rate(&self) -> f32 {
        let block = self.block_size();
        if block == 0 {
            return 0.0;
        }
        self.sample_rate() / block as f32
    }
}
