//! Ranging calibration
//!
//! Converts timer ticks to centimeters and bounds the echo waits. The
//! conversion is `(ticks / tick_divisor + tick_offset) / cm_divisor` with
//! integer division at each stage; the divisors have to be tuned to the
//! tick rate of the counter the board uses.

use super::ConfigError;

/// Ranging calibration constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangingCalibration {
    /// First-stage divisor applied to raw ticks
    pub tick_divisor: u16,
    /// Offset added after the first stage
    pub tick_offset: u16,
    /// Second-stage divisor giving centimeters
    pub cm_divisor: u16,
    /// Physical separation of the two sensors of a pair (cm)
    pub baseline_cm: f32,
    /// Trigger pulse width in microseconds
    pub trigger_pulse_us: u32,
    /// Longest wait for the echo line to rise, in microseconds
    pub echo_start_timeout_us: u32,
    /// Poll interval while waiting for the echo to rise, in microseconds
    pub poll_interval_us: u32,
    /// Longest accepted echo pulse, in ticks
    pub max_echo_ticks: u16,
}

impl RangingCalibration {
    /// Calibration for a 0.4 us/tick counter (PIC Timer1, 20 MHz, 1:2 prescale)
    ///
    /// 150 ticks = 60 us of echo = 1 cm of range.
    pub const REFERENCE: Self = Self {
        tick_divisor: 50,
        tick_offset: 1,
        cm_divisor: 3,
        baseline_cm: 8.0,
        trigger_pulse_us: 10,
        echo_start_timeout_us: 30_000,
        poll_interval_us: 2,
        max_echo_ticks: 60_000,
    };

    /// Calibration for a 1 us/tick counter (RP2040 timer)
    pub const MICROSECOND_TICKS: Self = Self {
        tick_divisor: 20,
        max_echo_ticks: 30_000,
        ..Self::REFERENCE
    };

    /// Check the constants are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_divisor == 0 || self.cm_divisor == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if !(self.baseline_cm > 0.0) || !self.baseline_cm.is_finite() {
            return Err(ConfigError::InvalidBaseline);
        }
        if self.trigger_pulse_us == 0 || self.echo_start_timeout_us == 0 || self.max_echo_ticks == 0
        {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for RangingCalibration {
    fn default() -> Self {
        Self::REFERENCE
    }
}
