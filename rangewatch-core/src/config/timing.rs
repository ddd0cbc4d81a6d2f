//! Presentation and pacing delays
//!
//! The LCD is driven open-loop, so every step that touches it is followed
//! by a settle delay. All values are milliseconds.

/// Delays used by the acquisition cycle and the presentation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresentationTiming {
    /// After pin setup, before the LCD is initialized
    pub power_up_settle_ms: u32,
    /// After LCD initialization
    pub display_init_settle_ms: u32,
    /// After the counter is configured, before the legend is drawn
    pub timer_setup_settle_ms: u32,
    /// After each legend row
    pub legend_settle_ms: u32,
    /// At the start of every acquisition pass
    pub pass_start_ms: u32,
    /// Before each slot's measurement
    pub slot_start_ms: u32,
    /// After an angle has been drawn
    pub angle_settle_ms: u32,
    /// Between the two cursor steps that follow a tens digit
    pub digit_step_settle_ms: u32,
    /// Alarm hold for an obstacle in the alert band
    pub alert_hold_ms: u32,
    /// After the cursor steps of the alert path
    pub alert_shift_settle_ms: u32,
    /// After a distance field (alert, numeric or out of range) is drawn
    pub field_settle_ms: u32,
    /// Buzzer on-time of one chirp
    pub chirp_on_ms: u32,
    /// Buzzer off-time after one chirp
    pub chirp_off_ms: u32,
    /// Number of chirps in the boundary band
    pub chirp_count: u8,
    /// After each slot's handling
    pub slot_settle_ms: u32,
    /// After every completed pass
    pub pass_settle_ms: u32,
}

impl PresentationTiming {
    /// Timing of the reference board
    pub const REFERENCE: Self = Self {
        power_up_settle_ms: 50,
        display_init_settle_ms: 50,
        timer_setup_settle_ms: 20,
        legend_settle_ms: 40,
        pass_start_ms: 20,
        slot_start_ms: 5,
        angle_settle_ms: 40,
        digit_step_settle_ms: 20,
        alert_hold_ms: 1000,
        alert_shift_settle_ms: 2,
        field_settle_ms: 20,
        chirp_on_ms: 30,
        chirp_off_ms: 20,
        chirp_count: 2,
        slot_settle_ms: 100,
        pass_settle_ms: 100,
    };
}

impl Default for PresentationTiming {
    fn default() -> Self {
        Self::REFERENCE
    }
}
