//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in rangewatch-core, written against the pin and
//! counter traits of rangewatch-hal:
//!
//! - HD44780 character LCD over a 4-bit parallel bus
//! - Alarm LED and buzzer on GPIOs (active-high or active-low)
//! - Sensor bank of four trigger/echo line pairs

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alarm;
pub mod lcd;
pub mod sensor;

pub use alarm::GpioAlarm;
pub use lcd::Hd44780;
pub use sensor::PinSensorBank;
