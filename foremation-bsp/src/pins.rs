//! Pin map
//!
//! Logical knobs, switches and LEDs and the Seed header pins they are wired
//! to. The tables are fixed at build time; lookups by enum cannot fail,
//! lookups by raw index are bounds-checked.

use heapless::FnvIndexSet;

use foremation_hal::seed::SEED_PIN_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A logical identifier bound to a Seed header pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinBinding<Id> {
    pub id: Id,
    pub pin: u8,
}

impl<Id> PinBinding<Id> {
    pub const fn new(id: Id, pin: u8) -> Self {
        Self { id, pin }
    }
}

/// Pin map validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin claimed twice
    Conflict(u8),
    /// Pin does not exist on the Seed
    Invalid(u8),
}

/// Panel knobs (and CV inputs summed with them)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ctrl {
    Pitch1,
    Formant,
    Detune,
    Aire,
    Pitch2,
    Barrel,
    Fine,
    Fm,
}

impl Ctrl {
    pub const COUNT: usize = 8;

    pub const ALL: [Ctrl; Ctrl::COUNT] = [
        Ctrl::Pitch1,
        Ctrl::Formant,
        Ctrl::Detune,
        Ctrl::Aire,
        Ctrl::Pitch2,
        Ctrl::Barrel,
        Ctrl::Fine,
        Ctrl::Fm,
    ];

    /// Position in the control table (also the ADC channel slot)
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Seed pin the knob is wired to
    pub const fn pin(self) -> u8 {
        CTRL_PINS[self as usize].pin
    }
}

/// Panel switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sw {
    OctUp,
    OctDown,
    Wave1A,
    Wave1B,
    Wave2A,
    Wave2B,
    FiltVcaA,
    FiltVcaB,
}

impl Sw {
    pub const COUNT: usize = 8;

    pub const ALL: [Sw; Sw::COUNT] = [
        Sw::OctUp,
        Sw::OctDown,
        Sw::Wave1A,
        Sw::Wave1B,
        Sw::Wave2A,
        Sw::Wave2B,
        Sw::FiltVcaA,
        Sw::FiltVcaB,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Seed pin the switch is wired to
    pub const fn pin(self) -> u8 {
        SW_PINS[self as usize].pin
    }
}

/// Pitch-range indicator LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PitchLed {
    Led1,
    Led2,
    Led3,
    Led4,
    Led5,
}

impl PitchLed {
    pub const COUNT: usize = 5;

    pub const ALL: [PitchLed; PitchLed::COUNT] = [
        PitchLed::Led1,
        PitchLed::Led2,
        PitchLed::Led3,
        PitchLed::Led4,
        PitchLed::Led5,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Seed pin the LED is wired to
    pub const fn pin(self) -> u8 {
        LED_PINS[self as usize].pin
    }
}

/// Knob pins, in [`Ctrl`] order
pub const CTRL_PINS: [PinBinding<Ctrl>; Ctrl::COUNT] = [
    PinBinding::new(Ctrl::Pitch1, 15),
    PinBinding::new(Ctrl::Formant, 16),
    PinBinding::new(Ctrl::Detune, 17),
    PinBinding::new(Ctrl::Aire, 18),
    PinBinding::new(Ctrl::Pitch2, 19),
    PinBinding::new(Ctrl::Barrel, 21),
    PinBinding::new(Ctrl::Fine, 24),
    PinBinding::new(Ctrl::Fm, 25),
];

/// Switch pins, in [`Sw`] order
pub const SW_PINS: [PinBinding<Sw>; Sw::COUNT] = [
    PinBinding::new(Sw::OctUp, 22),
    PinBinding::new(Sw::OctDown, 23),
    PinBinding::new(Sw::Wave1A, 29),
    PinBinding::new(Sw::Wave1B, 28),
    PinBinding::new(Sw::Wave2A, 27),
    PinBinding::new(Sw::Wave2B, 26),
    PinBinding::new(Sw::FiltVcaA, 0),
    PinBinding::new(Sw::FiltVcaB, 30),
];

/// LED pins, in [`PitchLed`] order
pub const LED_PINS: [PinBinding<PitchLed>; PitchLed::COUNT] = [
    PinBinding::new(PitchLed::Led1, 1),
    PinBinding::new(PitchLed::Led2, 2),
    PinBinding::new(PitchLed::Led3, 3),
    PinBinding::new(PitchLed::Led4, 4),
    PinBinding::new(PitchLed::Led5, 5),
];

/// Check that every pin exists and none is claimed twice
pub fn check_pins<I>(pins: I) -> Result<(), PinError>
where
    I: IntoIterator<Item = u8>,
{
    // Capacity must be a power of two; covers every Seed pin
    let mut claimed: FnvIndexSet<u8, 32> = FnvIndexSet::new();

    for pin in pins {
        if pin >= SEED_PIN_COUNT {
            return Err(PinError::Invalid(pin));
        }
        match claimed.insert(pin) {
            Ok(true) => {}
            Ok(false) => return Err(PinError::Conflict(pin)),
            Err(_) => return Err(PinError::Invalid(pin)),
        }
    }

    Ok(())
}

/// Validate the whole board pin map
pub fn validate_pin_map() -> Result<(), PinError> {
    check_pins(
        CTRL_PINS
            .iter()
            .map(|b| b.pin)
            .chain(SW_PINS.iter().map(|b| b.pin))
            .chain(LED_PINS.iter().map(|b| b.pin)),
    )
}
