//! Board-agnostic core logic for the ranging display firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (character display, alarm output, sensor bank)
//! - Ranging engine: trigger, bounded echo timing, tick-to-cm conversion
//! - Bearing estimation for each sensor pair
//! - Presentation state machine (what to draw and when to sound the alarm)
//! - The acquisition cycle tying them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bearing;
pub mod config;
pub mod cycle;
pub mod presentation;
pub mod ranging;
pub mod slot;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use cycle::{PassReport, Rangefinder};
pub use slot::{SensorPair, SensorSlot, PAIR_COUNT, SENSOR_COUNT};
