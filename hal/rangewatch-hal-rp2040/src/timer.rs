//! Echo pulse counter
//!
//! The RP2040 timer is a free-running 1 MHz counter that cannot be
//! gated, so gating is done in software: `start` and `stop` take
//! timestamps from the embassy time driver and the elapsed microseconds
//! accumulate. One tick is one microsecond when embassy-time runs at its
//! default 1 MHz tick rate.

use embassy_time::Instant;
use rangewatch_hal::TickCounter;

/// Software-gated microsecond counter
#[derive(Default)]
pub struct EchoCounter {
    accumulated_us: u64,
    started: Option<Instant>,
}

impl EchoCounter {
    /// Create a stopped, cleared counter
    pub const fn new() -> Self {
        Self {
            accumulated_us: 0,
            started: None,
        }
    }

    /// Count so far, saturating at the 16-bit range
    fn count(&self) -> u16 {
        let running_us = self.started.map(|s| s.elapsed().as_micros()).unwrap_or(0);
        let total = self.accumulated_us.saturating_add(running_us);
        total.min(u64::from(u16::MAX)) as u16
    }
}

impl TickCounter for EchoCounter {
    fn reset(&mut self) {
        self.accumulated_us = 0;
        self.started = None;
    }

    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated_us = self
                .accumulated_us
                .saturating_add(started.elapsed().as_micros());
        }
    }

    fn read_high(&mut self) -> u8 {
        (self.count() >> 8) as u8
    }

    fn read_low(&mut self) -> u8 {
        self.count() as u8
    }

    // One timestamp for both halves, so a carry between reads cannot tear
    fn ticks(&mut self) -> u16 {
        self.count()
    }
}
