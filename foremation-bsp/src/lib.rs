//! Board support for the Foremation synth voice
//!
//! Maps the panel (eight knobs, eight switches, five pitch-range LEDs) and
//! the on-module codec of a Daisy Seed to logical identifiers, and wraps
//! them behind a single board façade:
//!
//! - Pin map for knobs, switches and LEDs
//! - SAI / audio handle configuration per Seed revision
//! - Smoothed analog controls
//! - Debounced panel switches
//! - Lock-free knob snapshot for the audio callback
//! - Pitch-range LED indicator
//! - [`Foremation`] lifecycle: init, audio, ADC, per-cycle processing
//!
//! The platform itself is consumed through the traits in `foremation-hal`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod audio;
pub mod board;
pub mod config;
pub mod controls;
pub mod error;
pub mod pins;

#[cfg(test)]
mod mock;

pub use board::{BoardState, Foremation};
pub use config::BoardConfig;
pub use controls::KnobSnapshot;
pub use error::BoardError;
pub use pins::{Ctrl, PitchLed, Sw};
