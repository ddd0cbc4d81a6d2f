//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware builds a
//! [`BoardConfig`] at compile time from its board description and injects
//! it at startup; nothing here is read or written at runtime.

pub mod calibration;
pub mod hardware;
pub mod timing;

pub use calibration::*;
pub use hardware::*;
pub use timing::*;

/// Errors found while validating a board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same GPIO is assigned to two roles
    DuplicatePin(u8),
    /// GPIO number beyond what the board has
    InvalidPin(u8),
    /// A tick-to-cm divisor is zero
    ZeroDivisor,
    /// Sensor pair baseline is not a positive distance
    InvalidBaseline,
    /// An echo timeout, the trigger pulse or the LCD enable hold is zero
    ZeroTimeout,
}
