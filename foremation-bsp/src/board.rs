//! Board façade
//!
//! [`Foremation`] owns the Seed and every panel bank. The synth engine calls
//! [`Foremation::init`] once, hands an audio callback to
//! [`Foremation::start_audio`], and calls
//! [`Foremation::process_all_controls`] once per control cycle. The audio
//! callback reads knobs through a [`KnobSnapshot`] attached with
//! [`Foremation::attach_knob_snapshot`].
//!
//! ```text
//! Unconfigured ──init──▶ Configured ──start_audio──▶ Streaming
//!      │                     ▲                           │
//!      │                     └────────stop_audio─────────┘
//!      └──init error──▶ Failed
//! ```

use heapless::Vec;

use foremation_hal::adc::{Adc, AdcChannelConfig};
use foremation_hal::audio::{AudioCallback, AudioHandle, SampleRate};
use foremation_hal::seed::Seed;

use crate::audio::init_audio_path;
use crate::config::BoardConfig;
use crate::controls::{
    AnalogBank, AnalogControl, KnobSnapshot, Led, LedBank, Switch, SwitchBank,
};
use crate::error::BoardError;
use crate::pins::{validate_pin_map, Ctrl, PitchLed, Sw};

/// Board lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardState {
    /// Constructed, `init` not yet run
    Unconfigured,
    /// Platform and banks initialized, audio stopped
    Configured,
    /// Audio callback running
    Streaming,
    /// `init` failed after touching the platform
    Failed,
}

/// The Foremation board
pub struct Foremation<S: Seed> {
    seed: S,
    config: BoardConfig,
    state: BoardState,
    adc_running: bool,
    controls: AnalogBank<{ Ctrl::COUNT }>,
    switches: SwitchBank<S::Input, { Sw::COUNT }>,
    leds: LedBank<S::Output, { PitchLed::COUNT }>,
    snapshot: Option<&'static KnobSnapshot>,
}

impl<S: Seed> Foremation<S> {
    /// Wrap a Seed with the default board configuration
    pub fn new(seed: S) -> Self {
        Self::with_config(seed, BoardConfig::default())
    }

    /// Wrap a Seed with an explicit board configuration
    pub fn with_config(seed: S, config: BoardConfig) -> Self {
        Self {
            seed,
            config,
            state: BoardState::Unconfigured,
            adc_running: false,
            controls: AnalogBank::new(0.0, config.knob_flip, config.knob_slew_seconds),
            switches: SwitchBank::new(),
            leds: LedBank::new(),
            snapshot: None,
        }
    }

    /// Bring up the Seed, the audio path and every panel bank
    ///
    /// Must be called exactly once before anything else. If a platform step
    /// fails the board moves to [`BoardState::Failed`] with its banks
    /// untouched, and later calls return [`BoardError::InitFailed`].
    pub fn init(&mut self, boost: bool) -> Result<(), BoardError<S::Error>> {
        match self.state {
            BoardState::Unconfigured => {}
            BoardState::Failed => return Err(BoardError::InitFailed),
            BoardState::Configured | BoardState::Streaming => {
                return Err(BoardError::AlreadyInitialized)
            }
        }

        if let Err(err) = self.bring_up(boost) {
            self.state = BoardState::Failed;

            #[cfg(feature = "defmt")]
            defmt::error!("Foremation init failed");

            return Err(err);
        }

        self.state = BoardState::Configured;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Foremation ready: {} Hz, block {}, controls at {} Hz",
            self.audio_sample_rate(),
            self.audio_block_size(),
            self.audio_callback_rate()
        );

        Ok(())
    }

    /// Every fallible platform step, then the banks
    fn bring_up(&mut self, boost: bool) -> Result<(), BoardError<S::Error>> {
        self.seed.configure();
        self.seed.init(boost).map_err(BoardError::Platform)?;
        validate_pin_map()?;

        self.init_audio()?;
        self.init_adc()?;
        let switches = self.claim_switches()?;
        let leds = self.claim_leds()?;

        let rate = self.audio_callback_rate();
        self.controls = AnalogBank::new(
            rate,
            self.config.knob_flip,
            self.config.knob_slew_seconds,
        );
        self.switches = SwitchBank::from_switches(switches);
        // from_leds forces every LED off
        self.leds = LedBank::from_leds(leds);
        self.publish_knobs();
        Ok(())
    }

    fn init_audio(&mut self) -> Result<(), BoardError<S::Error>> {
        let version = self.seed.board_version();

        #[cfg(feature = "defmt")]
        defmt::debug!("Audio path for {}", version);

        init_audio_path(self.seed.audio_mut(), version, &self.config).map_err(BoardError::Platform)
    }

    fn init_adc(&mut self) -> Result<(), BoardError<S::Error>> {
        let channels = Ctrl::ALL.map(|ctrl| AdcChannelConfig::single(ctrl.pin()));
        let adc = self.seed.adc_mut();
        adc.init(&channels).map_err(BoardError::Platform)?;

        match adc.channel_count() {
            Ctrl::COUNT => Ok(()),
            count => Err(BoardError::AdcChannels(count)),
        }
    }

    fn claim_switches(
        &mut self,
    ) -> Result<Vec<Switch<S::Input>, { Sw::COUNT }>, BoardError<S::Error>> {
        let config = self.config;
        let rate = self.audio_callback_rate();
        let seed = &mut self.seed;

        Sw::ALL
            .iter()
            .map(|sw| {
                seed.input_pin(sw.pin(), config.switch_pull).map(|pin| {
                    Switch::new(
                        pin,
                        rate,
                        config.switch_type,
                        config.switch_polarity,
                        config.switch_pull,
                    )
                })
            })
            .collect::<Result<_, _>>()
            .map_err(BoardError::Platform)
    }

    fn claim_leds(
        &mut self,
    ) -> Result<Vec<Led<S::Output>, { PitchLed::COUNT }>, BoardError<S::Error>> {
        let seed = &mut self.seed;

        PitchLed::ALL
            .iter()
            .map(|led| seed.output_pin(led.pin()).map(Led::new_active_high))
            .collect::<Result<_, _>>()
            .map_err(BoardError::Platform)
    }

    fn publish_knobs(&self) {
        if let Some(snapshot) = self.snapshot {
            snapshot.publish(&self.controls);
        }
    }

    fn ensure_configured(&self) -> Result<(), BoardError<S::Error>> {
        match self.state {
            BoardState::Unconfigured => Err(BoardError::NotInitialized),
            BoardState::Failed => Err(BoardError::InitFailed),
            BoardState::Configured | BoardState::Streaming => Ok(()),
        }
    }

    /// Push the current callback rate to every rate-dependent control
    fn set_hid_update_rates(&mut self) {
        let rate = self.audio_callback_rate();
        self.controls.set_sample_rate(rate);
        self.switches.set_sample_rate(rate);

        #[cfg(feature = "defmt")]
        defmt::debug!("Control rate now {} Hz", rate);
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The underlying Seed
    pub fn seed(&self) -> &S {
        &self.seed
    }

    /// The underlying Seed, for direct peripheral access
    pub fn seed_mut(&mut self) -> &mut S {
        &mut self.seed
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.seed.delay_ms(ms);
    }

    /// Start streaming with a per-block callback
    pub fn start_audio(&mut self, callback: AudioCallback) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed
            .audio_mut()
            .start(callback)
            .map_err(BoardError::Platform)?;
        self.state = BoardState::Streaming;

        #[cfg(feature = "defmt")]
        defmt::info!("Audio started");

        Ok(())
    }

    /// Swap the audio callback without stopping the stream
    pub fn change_audio_callback(
        &mut self,
        callback: AudioCallback,
    ) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed
            .audio_mut()
            .change_callback(callback)
            .map_err(BoardError::Platform)
    }

    /// Stop streaming
    pub fn stop_audio(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed.audio_mut().stop().map_err(BoardError::Platform)?;
        self.state = BoardState::Configured;

        #[cfg(feature = "defmt")]
        defmt::info!("Audio stopped");

        Ok(())
    }

    /// Change the audio sample rate and re-rate every control
    pub fn set_audio_sample_rate(&mut self, rate: SampleRate) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed
            .audio_mut()
            .set_sample_rate(rate)
            .map_err(BoardError::Platform)?;
        self.config.sample_rate = rate;
        self.set_hid_update_rates();
        Ok(())
    }

    /// Audio sample rate in Hz
    pub fn audio_sample_rate(&self) -> f32 {
        self.seed.audio().sample_rate()
    }

    /// Change the audio block size and re-rate every control
    ///
    /// Defaults to 48 samples.
    pub fn set_audio_block_size(&mut self, size: usize) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed
            .audio_mut()
            .set_block_size(size)
            .map_err(BoardError::Platform)?;
        self.config.block_size = size;
        self.set_hid_update_rates();
        Ok(())
    }

    /// Samples per channel in one audio block
    pub fn audio_block_size(&self) -> usize {
        self.seed.audio().block_size()
    }

    /// Rate in Hz at which the audio callback runs
    pub fn audio_callback_rate(&self) -> f32 {
        self.seed.audio().callback_rate()
    }

    /// Start background ADC conversion
    pub fn start_adc(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed.adc_mut().start().map_err(BoardError::Platform)?;
        self.adc_running = true;
        Ok(())
    }

    /// Stop background ADC conversion
    pub fn stop_adc(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.seed.adc_mut().stop().map_err(BoardError::Platform)?;
        self.adc_running = false;
        Ok(())
    }

    pub fn adc_running(&self) -> bool {
        self.adc_running
    }

    /// Update every knob from its latest ADC sample
    ///
    /// Call at the same rate the controls were configured for.
    pub fn process_analog_controls(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.controls.process(self.seed.adc());
        self.publish_knobs();
        Ok(())
    }

    /// Debounce every switch
    pub fn process_digital_controls(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.switches.debounce();
        Ok(())
    }

    /// Process analog then digital controls
    pub fn process_all_controls(&mut self) -> Result<(), BoardError<S::Error>> {
        self.process_analog_controls()?;
        self.process_digital_controls()
    }

    /// Publish knob values to `snapshot` after every analog process call
    ///
    /// The current values are published immediately.
    pub fn attach_knob_snapshot(&mut self, snapshot: &'static KnobSnapshot) {
        self.snapshot = Some(snapshot);
        self.publish_knobs();
    }

    /// Latest smoothed value of a knob, 0.0-1.0
    pub fn knob_value(&self, ctrl: Ctrl) -> f32 {
        self.controls[ctrl.index()].value()
    }

    /// Latest smoothed value of the knob at a raw table index
    pub fn knob_value_index(&self, index: usize) -> Result<f32, BoardError<S::Error>> {
        self.ensure_configured()?;
        self.controls
            .get(index)
            .map(AnalogControl::value)
            .ok_or(BoardError::InvalidControl(index))
    }

    /// A knob's control, once the board is initialized
    pub fn control(&self, ctrl: Ctrl) -> Option<&AnalogControl> {
        self.ensure_configured().ok()?;
        self.controls.get(ctrl.index())
    }

    /// A switch, once the board is initialized
    pub fn switch(&self, sw: Sw) -> Option<&Switch<S::Input>> {
        self.switches.get(sw.index())
    }

    /// A switch, mutably (for taking latched edges)
    pub fn switch_mut(&mut self, sw: Sw) -> Option<&mut Switch<S::Input>> {
        self.switches.get_mut(sw.index())
    }

    /// A switch at a raw table index
    pub fn switch_index(&self, index: usize) -> Result<&Switch<S::Input>, BoardError<S::Error>> {
        self.ensure_configured()?;
        self.switches
            .get(index)
            .ok_or(BoardError::InvalidSwitch(index))
    }

    /// Turn every pitch LED off
    pub fn clear_leds(&mut self) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        self.leds.clear();
        Ok(())
    }

    /// Light exactly one pitch LED
    pub fn set_led(&mut self, led: PitchLed) -> Result<(), BoardError<S::Error>> {
        self.set_led_index(led.index())
    }

    /// Light exactly the pitch LED at a raw table index
    ///
    /// An index outside the table is reported and leaves the LEDs as they
    /// were.
    pub fn set_led_index(&mut self, index: usize) -> Result<(), BoardError<S::Error>> {
        self.ensure_configured()?;
        if self.leds.set_one(index) {
            Ok(())
        } else {
            Err(BoardError::InvalidLed(index))
        }
    }
}
