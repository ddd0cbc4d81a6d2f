//! RP2040-specific HAL for the ranging display firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `rangewatch-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO wrappers (embassy-rp `Output`/`Input` as hal pins)
//! - Dynamic pin allocation for config-driven setup
//! - Echo pulse counter on the embassy time driver

#![no_std]

pub mod gpio;
pub mod pins;
pub mod timer;

pub use gpio::{RpInput, RpOutput};
pub use pins::{PinBank, PinError, GPIO_COUNT};
pub use timer::EchoCounter;
