//! Multi-channel ADC abstraction
//!
//! The platform runs the ADC in the background (DMA on the Seed) and keeps
//! the latest conversion of every channel in a buffer. The board layer only
//! configures the channels, starts/stops conversion, and reads the latest
//! sample of a channel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full-scale count of a raw sample
///
/// Samples are left-aligned to 16 bits regardless of the converter's
/// native resolution.
pub const ADC_FULL_SCALE: f32 = 65536.0;

/// Configuration for one ADC channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcChannelConfig {
    /// Seed pin number the channel reads
    pub pin: u8,
}

impl AdcChannelConfig {
    /// Single-ended channel on a Seed pin
    pub const fn single(pin: u8) -> Self {
        Self { pin }
    }
}

/// Background multi-channel ADC
pub trait Adc {
    /// Error type for ADC operations
    type Error;

    /// Configure the converter with one slot per channel, in order
    fn init(&mut self, channels: &[AdcChannelConfig]) -> Result<(), Self::Error>;

    /// Start continuous background conversion
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Stop background conversion
    ///
    /// The last converted samples remain readable.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Latest sample of a channel slot
    ///
    /// The platform guarantees the read is tear-free. Slots that were never
    /// converted read as 0.
    fn sample(&self, channel: usize) -> u16;

    /// Number of configured channel slots
    fn channel_count(&self) -> usize;
}
