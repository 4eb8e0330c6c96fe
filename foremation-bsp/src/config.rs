//! Board configuration
//!
//! Everything is compiled in; [`BoardConfig::default`] is the Foremation
//! panel as built. The struct exists so a variant board or a test can
//! override individual values before `init`.

use foremation_hal::audio::SampleRate;
use foremation_hal::gpio::Pull;

use crate::controls::switch::{Polarity, SwitchType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default samples per channel per audio callback
pub const DEFAULT_BLOCK_SIZE: usize = 48;

/// Default output gain applied by the audio handle
pub const DEFAULT_POST_GAIN: f32 = 0.5;

/// Default knob smoothing time in seconds
pub const DEFAULT_KNOB_SLEW_SECONDS: f32 = 0.002;

/// Board configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Audio stream sample rate
    pub sample_rate: SampleRate,
    /// Samples per channel per audio callback
    pub block_size: usize,
    /// Output gain applied after the callback
    pub post_gain: f32,
    /// Knob smoothing time in seconds
    pub knob_slew_seconds: f32,
    /// Knobs read inverted (raw low = full scale)
    ///
    /// True on this panel: the pots are wired with the wiper rising toward
    /// ground.
    pub knob_flip: bool,
    /// Behavior of the panel switches
    pub switch_type: SwitchType,
    /// Electrical sense of the panel switches
    pub switch_polarity: Polarity,
    /// Pull resistor on the switch inputs
    pub switch_pull: Pull,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Khz48,
            block_size: DEFAULT_BLOCK_SIZE,
            post_gain: DEFAULT_POST_GAIN,
            knob_slew_seconds: DEFAULT_KNOB_SLEW_SECONDS,
            knob_flip: true,
            switch_type: SwitchType::Toggle,
            switch_polarity: Polarity::Inverted,
            switch_pull: Pull::Up,
        }
    }
}

impl BoardConfig {
    /// Create the default board configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback rate implied by the configured sample rate and block size
    pub fn callback_rate(&self) -> f32 {
        if self.block_size == 0 {
            return 0.0;
        }
        self.sample_rate.hz() as f32 / self.block_size as f32
    }
}
