//! Echo outcomes and tick-to-centimeter conversion

use crate::config::RangingCalibration;

/// Which echo wait ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutPhase {
    /// The echo line never went high after the trigger pulse
    NoRisingEdge,
    /// The echo line stayed high past the longest accepted pulse
    PulseTooLong,
}

/// Result of one trigger/echo measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoOutcome {
    /// Echo pulse width in counter ticks
    Measured(u16),
    /// No usable echo
    TimedOut(TimeoutPhase),
}

/// Distance recorded for one slot in the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceSample {
    /// Converted distance in whole centimeters
    Centimeters(u16),
    /// The measurement timed out
    NoEcho,
}

impl DistanceSample {
    /// Build a sample from a measurement
    pub fn from_outcome(outcome: EchoOutcome, calibration: &RangingCalibration) -> Self {
        match outcome {
            EchoOutcome::Measured(ticks) => Self::Centimeters(ticks_to_cm(ticks, calibration)),
            EchoOutcome::TimedOut(_) => Self::NoEcho,
        }
    }

    /// Distance used for classification and bearing
    ///
    /// A missing echo counts as 0 cm, the same value a cleared sample
    /// holds, so it always lands in the out-of-range band.
    pub const fn centimeters(self) -> u16 {
        match self {
            Self::Centimeters(cm) => cm,
            Self::NoEcho => 0,
        }
    }

    /// Check if the measurement timed out
    pub const fn is_no_echo(self) -> bool {
        matches!(self, Self::NoEcho)
    }
}

impl Default for DistanceSample {
    fn default() -> Self {
        Self::Centimeters(0)
    }
}

/// Convert an echo width in ticks to centimeters
///
/// `(ticks / tick_divisor + tick_offset) / cm_divisor`, truncating at each
/// stage. Zero divisors are treated as 1.
pub fn ticks_to_cm(ticks: u16, calibration: &RangingCalibration) -> u16 {
    let tick_divisor = calibration.tick_divisor.max(1);
    let cm_divisor = calibration.cm_divisor.max(1);
    (ticks / tick_divisor).saturating_add(calibration.tick_offset) / cm_divisor
}
