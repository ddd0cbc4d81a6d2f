//! Hardware configuration types
//!
//! Maps every logical role (trigger/echo per sensor, alarm outputs, LCD
//! bus lines) to a physical GPIO number.

use heapless::FnvIndexSet;

use super::{ConfigError, PresentationTiming, RangingCalibration};
use crate::slot::SENSOR_COUNT;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new active-high pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Trigger and echo lines of one ultrasonic sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPins {
    /// Trigger output
    pub trigger: u8,
    /// Echo input
    pub echo: u8,
}

/// HD44780 4-bit parallel bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// Register select (low = command, high = data)
    pub rs: u8,
    /// Enable strobe
    pub en: u8,
    /// Data lines D4..D7
    pub data: [u8; 4],
    /// How long EN is held high per nibble, in microseconds
    pub enable_hold_us: u32,
}

impl LcdConfig {
    /// Enable hold of the reference board
    pub const DEFAULT_ENABLE_HOLD_US: u32 = 10_000;
}

/// Alarm outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmPins {
    /// Alert LED
    pub led: PinConfig,
    /// Buzzer
    pub buzzer: PinConfig,
}

/// Complete board configuration
///
/// This is the top-level structure injected at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Sensor lines, indexed by slot
    pub sensors: [SensorPins; SENSOR_COUNT],
    /// LCD bus
    pub lcd: LcdConfig,
    /// Alarm outputs
    pub alarm: AlarmPins,
    /// Tick-to-cm conversion and echo bounds
    pub calibration: RangingCalibration,
    /// Settle and hold delays
    pub timing: PresentationTiming,
}

impl BoardConfig {
    /// Highest GPIO number accepted
    pub const MAX_GPIO: u8 = 29;

    /// Iterate over every GPIO the board uses
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.sensors
            .iter()
            .flat_map(|s| [s.trigger, s.echo])
            .chain([self.lcd.rs, self.lcd.en])
            .chain(self.lcd.data)
            .chain([self.alarm.led.pin, self.alarm.buzzer.pin])
    }

    /// Check for pin conflicts and unusable calibration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: FnvIndexSet<u8, 32> = FnvIndexSet::new();
        for pin in self.pins() {
            if pin > Self::MAX_GPIO {
                return Err(ConfigError::InvalidPin(pin));
            }
            match seen.insert(pin) {
                Ok(true) => {}
                Ok(false) | Err(_) => return Err(ConfigError::DuplicatePin(pin)),
            }
        }
        if self.lcd.enable_hold_us == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.calibration.validate()
    }
}
