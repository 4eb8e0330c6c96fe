//! Audio path configuration
//!
//! Builds the SAI and audio handle configuration for the on-module codec.
//! The Seed revisions share every setting except which data line carries
//! DAC samples and which carries ADC samples.

use foremation_hal::audio::{
    AudioConfig, AudioHandle, BitDepth, ClockRole, Direction, Port, PortPin, SaiConfig,
    SaiPeripheral, SaiPins,
};
use foremation_hal::seed::BoardVersion;

use crate::config::BoardConfig;

/// SAI1 wiring to the on-module codec
pub const CODEC_SAI_PINS: SaiPins = SaiPins {
    mclk: PortPin::new(Port::E, 2),
    sck: PortPin::new(Port::E, 5),
    fs: PortPin::new(Port::E, 4),
    sa: PortPin::new(Port::E, 6),
    sb: PortPin::new(Port::E, 3),
};

/// Which SAI data line carries which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataLineLayout {
    /// Line A receives from the codec, line B transmits to it
    ReceiveTransmit,
    /// Line A transmits to the codec, line B receives from it
    TransmitReceive,
}

impl DataLineLayout {
    /// Layout used by a Seed revision
    pub const fn for_version(version: BoardVersion) -> Self {
        match version {
            BoardVersion::Seed1_1 => DataLineLayout::ReceiveTransmit,
            BoardVersion::Seed => DataLineLayout::TransmitReceive,
        }
    }

    /// Directions of data lines (A, B)
    pub const fn directions(self) -> (Direction, Direction) {
        match self {
            DataLineLayout::ReceiveTransmit => (Direction::Receive, Direction::Transmit),
            DataLineLayout::TransmitReceive => (Direction::Transmit, Direction::Receive),
        }
    }
}

/// SAI configuration for the on-module codec
pub fn sai_config(version: BoardVersion, config: &BoardConfig) -> SaiConfig {
    let (a_dir, b_dir) = DataLineLayout::for_version(version).directions();

    SaiConfig {
        periph: SaiPeripheral::Sai1,
        sample_rate: config.sample_rate,
        bit_depth: BitDepth::Bits24,
        a_sync: ClockRole::Master,
        b_sync: ClockRole::Slave,
        a_dir,
        b_dir,
        pins: CODEC_SAI_PINS,
    }
}

/// Audio handle configuration
pub fn audio_config(config: &BoardConfig) -> AudioConfig {
    AudioConfig {
        block_size: config.block_size,
        sample_rate: config.sample_rate,
        post_gain: config.post_gain,
    }
}

/// Prepare the audio handle for the codec
///
/// Does not start streaming; that happens when a callback is supplied.
pub fn init_audio_path<A: AudioHandle>(
    audio: &mut A,
    version: BoardVersion,
    config: &BoardConfig,
) -> Result<(), A::Error> {
    let sai = sai_config(version, config);
    let cfg = audio_config(config);
    audio.init(&cfg, &sai)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAudio;
    use foremation_hal::audio::SampleRate;

    #[test]
    fn test_seed_1_1_directions() {
        let sai = sai_config(BoardVersion::Seed1_1, &BoardConfig::default());
        assert_eq!(sai.a_dir, Direction::Receive);
        assert_eq!(sai.b_dir, Direction::Transmit);
    }

    #[test]
    fn test_seed_directions() {
        let sai = sai_config(BoardVersion::Seed, &BoardConfig::default());
        assert_eq!(sai.a_dir, Direction::Transmit);
        assert_eq!(sai.b_dir, Direction::Receive);
    }

    #[test]
    fn test_revisions_differ_only_in_directions() {
        let config = BoardConfig::default();
        let a = sai_config(BoardVersion::Seed1_1, &config);
        let mut b = sai_config(BoardVersion::Seed, &config);

        assert_ne!(a, b);
        b.a_dir = a.a_dir;
        b.b_dir = a.b_dir;
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_fields() {
        let sai = sai_config(BoardVersion::Seed, &BoardConfig::default());
        assert_eq!(sai.periph, SaiPeripheral::Sai1);
        assert_eq!(sai.sample_rate, SampleRate::Khz48);
        assert_eq!(sai.bit_depth, BitDepth::Bits24);
        assert_eq!(sai.a_sync, ClockRole::Master);
        assert_eq!(sai.b_sync, ClockRole::Slave);
        assert_eq!(sai.pins.mclk, PortPin::new(Port::E, 2));
        assert_eq!(sai.pins.sck, PortPin::new(Port::E, 5));
        assert_eq!(sai.pins.fs, PortPin::new(Port::E, 4));
        assert_eq!(sai.pins.sa, PortPin::new(Port::E, 6));
        assert_eq!(sai.pins.sb, PortPin::new(Port::E, 3));
    }

    #[test]
    fn test_audio_config_defaults() {
        let cfg = audio_config(&BoardConfig::default());
        assert_eq!(cfg.block_size, 48);
        assert_eq!(cfg.sample_rate, SampleRate::Khz48);
        assert_eq!(cfg.post_gain, 0.5);
    }

    #[test]
    fn test_init_audio_path_does_not_start() {
        let mut audio = MockAudio::default();
        init_audio_path(&mut audio, BoardVersion::Seed1_1, &BoardConfig::default()).unwrap();

        assert!(!audio.running);
        let sai = audio.sai.unwrap();
        assert_eq!(sai.a_dir, Direction::Receive);
        assert_eq!(audio.config.unwrap().block_size, 48);
    }
}
