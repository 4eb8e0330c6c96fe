//! Foremation platform abstraction layer
//!
//! This crate defines the traits the board support layer needs from the
//! underlying microcontroller platform. The platform owns clock setup, DMA,
//! and the SAI/ADC drivers; the board layer only configures and polls them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Synth engine (audio callback, UI loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  foremation-bsp (pins, banks, façade)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  foremation-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Seed platform implementation           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::Adc`] - Multi-channel background ADC
//! - [`audio::AudioHandle`] - Codec streaming over SAI
//! - [`seed::Seed`] - The module itself: init, pins, peripherals, delay

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod audio;
pub mod gpio;
pub mod seed;

// Re-export key traits at crate root for convenience
pub use adc::{Adc, AdcChannelConfig};
pub use audio::{AudioCallback, AudioConfig, AudioHandle, SaiConfig};
pub use gpio::{InputPin, OutputPin, Pull};
pub use seed::{BoardVersion, Seed};
