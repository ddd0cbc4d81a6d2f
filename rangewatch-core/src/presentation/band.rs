//! Distance bands

use core::ops::RangeInclusive;

/// Near-field band: write "Alert" and hold the alarm
pub const ALERT_BAND: RangeInclusive<u16> = 1..=5;

/// Band drawn as a two-digit number
pub const NUMERIC_BAND: RangeInclusive<u16> = 6..=99;

/// Boundary band that chirps the buzzer, independent of the other two
pub const CHIRP_BAND: RangeInclusive<u16> = 5..=10;

/// How a distance is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceBand {
    /// 1-5 cm
    Alert,
    /// 6-99 cm
    Numeric(u8),
    /// 0 cm (no echo) or beyond 99 cm
    OutOfRange,
}

impl DistanceBand {
    /// Classify a distance in centimeters
    pub fn classify(cm: u16) -> Self {
        if ALERT_BAND.contains(&cm) {
            Self::Alert
        } else if NUMERIC_BAND.contains(&cm) {
            // Fits: the band ends at 99
            Self::Numeric(cm as u8)
        } else {
            Self::OutOfRange
        }
    }

    /// Check if this band raises the alert
    pub fn is_alert(self) -> bool {
        matches!(self, Self::Alert)
    }
}

/// Check if a distance chirps the buzzer
pub fn in_chirp_band(cm: u16) -> bool {
    CHIRP_BAND.contains(&cm)
}
