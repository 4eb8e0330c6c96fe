//! Debounced switches
//!
//! Each switch shifts one raw sample per millisecond into an 8-bit history.
//! The stable state only changes once the whole history agrees, so contact
//! bounce shorter than 8 ms never reaches the synth. The millisecond clock
//! is derived from the control-cycle rate: every [`Switch::debounce`] call
//! advances it by one control period.

use heapless::Vec;

use foremation_hal::gpio::{InputPin, Pull};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval between raw samples shifted into the history
pub const DEBOUNCE_SAMPLE_PERIOD_MS: f32 = 1.0;

/// Switch behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchType {
    /// Push button: consumers act on presses
    Momentary,
    /// Latching switch: consumers act on the held position
    #[default]
    Toggle,
}

/// Electrical sense of a switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Pressed reads high
    #[default]
    Normal,
    /// Pressed reads low (switch to ground with pull-up)
    Inverted,
}

/// A debounced switch
pub struct Switch<P> {
    pin: P,
    kind: SwitchType,
    polarity: Polarity,
    pull: Pull,
    sample_rate: f32,
    /// Time advanced per debounce call
    period_ms: f32,
    /// Time accumulated since the last raw sample
    since_sample_ms: f32,
    /// Last 8 raw samples, newest in bit 0
    history: u8,
    pressed: bool,
    /// Edges seen on the most recent debounce call
    rising: bool,
    falling: bool,
    /// Edges not yet taken by a consumer
    rising_pending: bool,
    falling_pending: bool,
    held_ms: f32,
}

impl<P: InputPin> Switch<P> {
    /// Create a switch updated at `sample_rate` debounce calls per second
    ///
    /// `pull` records how the pin was configured by the platform.
    pub fn new(
        pin: P,
        sample_rate: f32,
        kind: SwitchType,
        polarity: Polarity,
        pull: Pull,
    ) -> Self {
        let mut switch = Self {
            pin,
            kind,
            polarity,
            pull,
            sample_rate,
            period_ms: DEBOUNCE_SAMPLE_PERIOD_MS,
            since_sample_ms: 0.0,
            history: 0,
            pressed: false,
            rising: false,
            falling: false,
            rising_pending: false,
            falling_pending: false,
            held_ms: 0.0,
        };
        switch.set_sample_rate(sample_rate);
        switch
    }

    /// Change the debounce call rate
    ///
    /// A non-positive rate falls back to one raw sample per call.
    pub fn set_sample_rate(&mut self, rate: f32) {
        self.sample_rate = rate;
        self.period_ms = if rate > 0.0 {
            1000.0 / rate
        } else {
            DEBOUNCE_SAMPLE_PERIOD_MS
        };
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn kind(&self) -> SwitchType {
        self.kind
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Advance the debounce clock by one control period
    ///
    /// Call once per control cycle.
    pub fn debounce(&mut self) {
        self.rising = false;
        self.falling = false;

        if self.pressed {
            self.held_ms += self.period_ms;
        }

        self.since_sample_ms += self.period_ms;
        if self.since_sample_ms < DEBOUNCE_SAMPLE_PERIOD_MS {
            return;
        }
        self.since_sample_ms -= DEBOUNCE_SAMPLE_PERIOD_MS;
        if self.since_sample_ms >= DEBOUNCE_SAMPLE_PERIOD_MS {
            // Slow control rate: one raw sample per call is the most we take
            self.since_sample_ms = 0.0;
        }

        let level = self.pin.is_high();
        let active = match self.polarity {
            Polarity::Normal => level,
            Polarity::Inverted => !level,
        };
        self.history = (self.history << 1) | active as u8;

        if !self.pressed && self.history == 0xFF {
            self.pressed = true;
            self.rising = true;
            self.rising_pending = true;
            self.held_ms = 0.0;
        } else if self.pressed && self.history == 0x00 {
            self.pressed = false;
            self.falling = true;
            self.falling_pending = true;
        }
    }

    /// Debounced state
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Became pressed on the most recent debounce call
    pub fn rising_edge(&self) -> bool {
        self.rising
    }

    /// Became released on the most recent debounce call
    pub fn falling_edge(&self) -> bool {
        self.falling
    }

    /// Became pressed since the last time this was taken
    pub fn take_rising_edge(&mut self) -> bool {
        core::mem::take(&mut self.rising_pending)
    }

    /// Became released since the last time this was taken
    pub fn take_falling_edge(&mut self) -> bool {
        core::mem::take(&mut self.falling_pending)
    }

    /// State as seen by the switch type
    ///
    /// Toggles report their held position, momentary switches only the
    /// control cycle on which they were pressed.
    pub fn is_active(&self) -> bool {
        match self.kind {
            SwitchType::Toggle => self.pressed,
            SwitchType::Momentary => self.rising,
        }
    }

    /// Time in ms the switch has been held, 0 when released
    pub fn time_held_ms(&self) -> f32 {
        if self.pressed {
            self.held_ms
        } else {
            0.0
        }
    }
}

/// Fixed bank of switches
pub struct SwitchBank<P, const N: usize> {
    switches: Vec<Switch<P>, N>,
}

impl<P: InputPin, const N: usize> Default for SwitchBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> SwitchBank<P, N> {
    /// Empty bank; filled by the board at init
    pub fn new() -> Self {
        Self {
            switches: Vec::new(),
        }
    }

    pub fn from_switches(switches: Vec<Switch<P>, N>) -> Self {
        Self { switches }
    }

    /// Debounce every switch once, in index order
    pub fn debounce(&mut self) {
        for switch in self.switches.iter_mut() {
            switch.debounce();
        }
    }

    /// Propagate a new debounce call rate to every switch
    pub fn set_sample_rate(&mut self, rate: f32) {
        for switch in self.switches.iter_mut() {
            switch.set_sample_rate(rate);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Switch<P>> {
        self.switches.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Switch<P>> {
        self.switches.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Switch<P>> {
        self.switches.iter()
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Mock input pin for testing
    struct MockPin {
        high: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> bool {
            self.high
        }
    }

    fn switch(polarity: Polarity, kind: SwitchType) -> Switch<MockPin> {
        let idle = polarity == Polarity::Inverted;
        Switch::new(MockPin { high: idle }, 1000.0, kind, polarity, Pull::Up)
    }

    fn hold(sw: &mut Switch<MockPin>, high: bool, cycles: usize) {
        sw.pin.high = high;
        for _ in 0..cycles {
            sw.debounce();
        }
    }

    #[test]
    fn test_initially_released() {
        let sw = switch(Polarity::Inverted, SwitchType::Toggle);
        assert!(!sw.pressed());
        assert!(!sw.rising_edge());
        assert!(!sw.is_active());
        assert_eq!(sw.time_held_ms(), 0.0);
    }

    #[test]
    fn test_press_needs_full_window() {
        let mut sw = switch(Polarity::Inverted, SwitchType::Toggle);

        // Inverted: pressed pulls the pin low
        hold(&mut sw, false, 7);
        assert!(!sw.pressed());

        sw.debounce();
        assert!(sw.pressed());
        assert!(sw.rising_edge());

        sw.debounce();
        assert!(sw.pressed());
        assert!(!sw.rising_edge());
    }

    #[test]
    fn test_release() {
        let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
        hold(&mut sw, true, 8);
        assert!(sw.pressed());

        hold(&mut sw, false, 7);
        assert!(sw.pressed());

        sw.debounce();
        assert!(!sw.pressed());
        assert!(sw.falling_edge());
    }

    #[test]
    fn test_latched_edges() {
        let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
        hold(&mut sw, true, 20);

        // Edge was several cycles ago but not yet taken
        assert!(!sw.rising_edge());
        assert!(sw.take_rising_edge());
        assert!(!sw.take_rising_edge());

        hold(&mut sw, false, 20);
        assert!(sw.take_falling_edge());
        assert!(!sw.take_falling_edge());
    }

    #[test]
    fn test_momentary_reports_press_only() {
        let mut sw = switch(Polarity::Normal, SwitchType::Momentary);
        hold(&mut sw, true, 8);
        assert!(sw.is_active());

        sw.debounce();
        assert!(sw.pressed());
        assert!(!sw.is_active());
    }

    #[test]
    fn test_toggle_reports_position() {
        let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
        hold(&mut sw, true, 30);
        assert!(sw.is_active());
    }

    #[test]
    fn test_time_held() {
        let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
        hold(&mut sw, true, 8);
        hold(&mut sw, true, 100);
        assert_eq!(sw.time_held_ms(), 100.0);

        hold(&mut sw, false, 8);
        assert_eq!(sw.time_held_ms(), 0.0);
    }

    #[test]
    fn test_fast_rate_samples_every_millisecond() {
        // 4 kHz control rate: four calls per raw sample
        let mut sw = Switch::new(
            MockPin { high: true },
            4000.0,
            SwitchType::Toggle,
            Polarity::Normal,
            Pull::None,
        );
        hold(&mut sw, true, 31);
        assert!(!sw.pressed());
        sw.debounce();
        assert!(sw.pressed());
    }

    #[test]
    fn test_slow_rate_samples_every_call() {
        let mut sw = Switch::new(
            MockPin { high: true },
            250.0,
            SwitchType::Toggle,
            Polarity::Normal,
            Pull::None,
        );
        hold(&mut sw, true, 8);
        assert!(sw.pressed());
    }

    #[test]
    fn test_bank_rate_propagation() {
        let mut switches = Vec::<Switch<MockPin>, 2>::new();
        for _ in 0..2 {
            let _ = switches.push(switch(Polarity::Normal, SwitchType::Toggle));
        }
        let mut bank = SwitchBank::from_switches(switches);
        bank.set_sample_rate(500.0);

        assert_eq!(bank.len(), 2);
        assert!(bank.iter().all(|s| s.sample_rate() == 500.0));
    }

    proptest! {
        #[test]
        fn prop_bounce_within_window_changes_state_once_at_most(
            start_pressed in any::<bool>(),
            bounce in proptest::collection::vec(any::<bool>(), 1..=8),
        ) {
            let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
            hold(&mut sw, start_pressed, 8);
            prop_assert_eq!(sw.pressed(), start_pressed);

            let mut transitions = 0;
            for level in bounce {
                let before = sw.pressed();
                hold(&mut sw, level, 1);
                if sw.pressed() != before {
                    transitions += 1;
                }
            }
            prop_assert!(transitions <= 1);
        }

        #[test]
        fn prop_alternating_input_never_changes_state(
            start_pressed in any::<bool>(),
            cycles in 1usize..200,
        ) {
            let mut sw = switch(Polarity::Normal, SwitchType::Toggle);
            hold(&mut sw, start_pressed, 8);

            for i in 0..cycles {
                hold(&mut sw, i % 2 == 0, 1);
                prop_assert_eq!(sw.pressed(), start_pressed);
            }
        }
    }
}
