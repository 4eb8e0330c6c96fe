//! Host-side mock platform for tests

use core::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use foremation_hal::adc::{Adc, AdcChannelConfig};
use foremation_hal::audio::{AudioCallback, AudioConfig, AudioHandle, SaiConfig, SampleRate};
use foremation_hal::gpio::{InputPin, OutputPin, Pull};
use foremation_hal::seed::{BoardVersion, Seed, SEED_PIN_COUNT};

/// Shared pin levels, indexed by Seed pin number
pub type Levels = Rc<RefCell<[bool; SEED_PIN_COUNT as usize]>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    InitFailed,
    PinUnavailable(u8),
    AdcNotConfigured,
}

#[derive(Default)]
pub struct MockAdc {
    pub channels: Vec<AdcChannelConfig>,
    pub samples: Rc<RefCell<Vec<u16>>>,
    pub running: bool,
    /// Channels the converter actually brings up; `None` for all requested
    pub max_channels: Option<usize>,
}

impl MockAdc {
    pub fn with_samples(samples: &[u16]) -> Self {
        Self {
            channels: samples.iter().map(|_| AdcChannelConfig::single(0)).collect(),
            samples: Rc::new(RefCell::new(samples.to_vec())),
            running: false,
            max_channels: None,
        }
    }
}

impl Adc for MockAdc {
    type Error = MockError;

    fn init(&mut self, channels: &[AdcChannelConfig]) -> Result<(), MockError> {
        let count = self.max_channels.map_or(channels.len(), |max| max.min(channels.len()));
        self.channels = channels[..count].to_vec();
        self.samples.borrow_mut().resize(channels.len(), 0);
        Ok(())
    }

    fn start(&mut self) -> Result<(), MockError> {
        if self.channels.is_empty() {
            return Err(MockError::AdcNotConfigured);
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MockError> {
        self.running = false;
        Ok(())
    }

    fn sample(&self, channel: usize) -> u16 {
        self.samples.borrow().get(channel).copied().unwrap_or(0)
    }

    fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[derive(Default)]
pub struct MockAudio {
    pub config: Option<AudioConfig>,
    pub sai: Option<SaiConfig>,
    pub callback: Option<AudioCallback>,
    pub running: bool,
    pub starts: usize,
    pub callback_changes: usize,
    pub rate: SampleRate,
    pub block: usize,
}

impl AudioHandle for MockAudio {
    type Error = MockError;

    fn init(&mut self, config: &AudioConfig, sai: &SaiConfig) -> Result<(), MockError> {
        self.config = Some(*config);
        self.sai = Some(*sai);
        self.rate = config.sample_rate;
        self.block = config.block_size;
        Ok(())
    }

    fn start(&mut self, callback: AudioCallback) -> Result<(), MockError> {
        self.callback = Some(callback);
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn change_callback(&mut self, callback: AudioCallback) -> Result<(), MockError> {
        self.callback = Some(callback);
        self.callback_changes += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MockError> {
        self.running = false;
        Ok(())
    }

    fn set_sample_rate(&mut self, rate: SampleRate) -> Result<(), MockError> {
        self.rate = rate;
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.rate.hz() as f32
    }

    fn set_block_size(&mut self, size: usize) -> Result<(), MockError> {
        self.block = size;
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.block
    }
}

pub struct MockInput {
    pin: u8,
    levels: Levels,
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> bool {
        self.levels.borrow()[self.pin as usize]
    }
}

pub struct MockOutput {
    pin: u8,
    levels: Levels,
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.levels.borrow_mut()[self.pin as usize] = true;
    }

    fn set_low(&mut self) {
        self.levels.borrow_mut()[self.pin as usize] = false;
    }
}

pub struct MockSeed {
    pub version: BoardVersion,
    pub configured: bool,
    pub initialized: bool,
    pub boost: bool,
    pub fail_init: bool,
    pub adc: MockAdc,
    pub audio: MockAudio,
    /// Levels seen by input pins; tests drive these
    pub inputs: Levels,
    /// Levels written by output pins
    pub outputs: Levels,
    pub claimed: Vec<u8>,
    pub delayed_ns: u64,
}

impl MockSeed {
    pub fn new(version: BoardVersion) -> Self {
        Self {
            version,
            configured: false,
            initialized: false,
            boost: false,
            fail_init: false,
            adc: MockAdc::default(),
            audio: MockAudio::default(),
            inputs: Rc::new(RefCell::new([false; SEED_PIN_COUNT as usize])),
            // Outputs float high until driven
            outputs: Rc::new(RefCell::new([true; SEED_PIN_COUNT as usize])),
            claimed: Vec::new(),
            delayed_ns: 0,
        }
    }

    fn claim(&mut self, pin: u8) -> Result<(), MockError> {
        if pin >= SEED_PIN_COUNT || self.claimed.contains(&pin) {
            return Err(MockError::PinUnavailable(pin));
        }
        self.claimed.push(pin);
        Ok(())
    }
}

impl DelayNs for MockSeed {
    fn delay_ns(&mut self, ns: u32) {
        self.delayed_ns += ns as u64;
    }
}

impl Seed for MockSeed {
    type Error = MockError;
    type Adc = MockAdc;
    type Audio = MockAudio;
    type Input = MockInput;
    type Output = MockOutput;

    fn configure(&mut self) {
        self.configured = true;
    }

    fn init(&mut self, boost: bool) -> Result<(), MockError> {
        if self.fail_init {
            return Err(MockError::InitFailed);
        }
        self.initialized = true;
        self.boost = boost;
        Ok(())
    }

    fn board_version(&self) -> BoardVersion {
        self.version
    }

    fn input_pin(&mut self, pin: u8, pull: Pull) -> Result<MockInput, MockError> {
        self.claim(pin)?;
        if pull == Pull::Up {
            self.inputs.borrow_mut()[pin as usize] = true;
        }
        Ok(MockInput {
            pin,
            levels: self.inputs.clone(),
        })
    }

    fn output_pin(&mut self, pin: u8) -> Result<MockOutput, MockError> {
        self.claim(pin)?;
        Ok(MockOutput {
            pin,
            levels: self.outputs.clone(),
        })
    }

    fn adc(&self) -> &MockAdc {
        &self.adc
    }

    fn adc_mut(&mut self) -> &mut MockAdc {
        &mut self.adc
    }

    fn audio(&self) -> &MockAudio {
        &self.audio
    }

    fn audio_mut(&mut self) -> &mut MockAudio {
        &mut self.audio
    }
}
