//! Analog controls
//!
//! Each control reads one background ADC slot per control cycle and runs it
//! through a one-pole lowpass so the synth sees a stable 0.0-1.0 value.

use foremation_hal::adc::{Adc, ADC_FULL_SCALE};

use crate::config::DEFAULT_KNOB_SLEW_SECONDS;

/// Smoothing coefficient for a slew time at a given update rate
///
/// Clamped to 1.0 so a slow update rate degrades to no smoothing instead of
/// overshooting.
fn slew_coefficient(slew_seconds: f32, rate: f32) -> f32 {
    let steps = slew_seconds * rate * 0.5;
    if steps <= 1.0 {
        1.0
    } else {
        1.0 / steps
    }
}

/// A smoothed analog control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogControl {
    /// ADC slot this control reads
    channel: usize,
    /// Update rate in Hz (one update per control cycle)
    sample_rate: f32,
    slew_seconds: f32,
    coeff: f32,
    /// Raw low reads as full scale
    flip: bool,
    value: f32,
    raw: u16,
}

impl AnalogControl {
    /// Create a control with the default slew time
    pub fn new(channel: usize, sample_rate: f32, flip: bool) -> Self {
        Self::with_slew(channel, sample_rate, flip, DEFAULT_KNOB_SLEW_SECONDS)
    }

    /// Create a control with an explicit slew time in seconds
    pub fn with_slew(channel: usize, sample_rate: f32, flip: bool, slew_seconds: f32) -> Self {
        Self {
            channel,
            sample_rate,
            slew_seconds,
            coeff: slew_coefficient(slew_seconds, sample_rate),
            flip,
            value: 0.0,
            raw: 0,
        }
    }

    /// Change the update rate
    ///
    /// Must follow any change to the audio callback rate, otherwise the
    /// smoothing time drifts.
    pub fn set_sample_rate(&mut self, rate: f32) {
        self.sample_rate = rate;
        self.coeff = slew_coefficient(self.slew_seconds, rate);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current smoothing coefficient (0, 1]
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Read the bound ADC slot once and update the smoothed value
    pub fn process<A: Adc + ?Sized>(&mut self, adc: &A) -> f32 {
        self.update(adc.sample(self.channel))
    }

    /// Feed one raw sample through the filter
    pub fn update(&mut self, raw: u16) -> f32 {
        self.raw = raw;

        let normalized = raw as f32 / ADC_FULL_SCALE;
        let target = if self.flip {
            1.0 - normalized
        } else {
            normalized
        };

        self.value += self.coeff * (target - self.value);
        self.value = self.value.clamp(0.0, 1.0);
        self.value
    }

    /// Most recent smoothed value, 0.0 before the first update
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Last raw sample seen by [`AnalogControl::update`]
    pub fn raw(&self) -> u16 {
        self.raw
    }
}

/// Fixed bank of analog controls, one per ADC slot
#[derive(Debug, Clone)]
pub struct AnalogBank<const N: usize> {
    controls: [AnalogControl; N],
}

impl<const N: usize> AnalogBank<N> {
    /// Bind control `i` to ADC slot `i`
    pub fn new(sample_rate: f32, flip: bool, slew_seconds: f32) -> Self {
        let mut channel = 0;
        let controls = [(); N].map(|_| {
            let control = AnalogControl::with_slew(channel, sample_rate, flip, slew_seconds);
            channel += 1;
            control
        });
        Self { controls }
    }

    /// Process every control once, in index order
    pub fn process<A: Adc + ?Sized>(&mut self, adc: &A) {
        for control in self.controls.iter_mut() {
            control.process(adc);
        }
    }

    /// Propagate a new update rate to every control
    pub fn set_sample_rate(&mut self, rate: f32) {
        for control in self.controls.iter_mut() {
            control.set_sample_rate(rate);
        }
    }

    pub fn get(&self, index: usize) -> Option<&AnalogControl> {
        self.controls.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AnalogControl> {
        self.controls.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalogControl> {
        self.controls.iter()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> core::ops::Index<usize> for AnalogBank<N> {
    type Output = AnalogControl;

    fn index(&self, index: usize) -> &AnalogControl {
        &self.controls[index]
    }
}
