//! Trigger/echo measurement
//!
//! The engine owns the sensor bank and the tick counter. A measurement is
//! strictly sequential: clear the counter, pulse the trigger, poll for the
//! echo's rising edge, gate the counter on while the echo is high, then
//! read the count back.

use embedded_hal::delay::DelayNs;
use rangewatch_hal::TickCounter;

use super::conversion::{DistanceSample, EchoOutcome, TimeoutPhase};
use crate::config::RangingCalibration;
use crate::slot::SensorSlot;
use crate::traits::SensorBank;

/// Ranging engine for the four-sensor bank
pub struct RangingEngine<B, C> {
    bank: B,
    counter: C,
    calibration: RangingCalibration,
}

impl<B: SensorBank, C: TickCounter> RangingEngine<B, C> {
    /// Create a new ranging engine
    pub fn new(bank: B, counter: C, calibration: RangingCalibration) -> Self {
        Self {
            bank,
            counter,
            calibration,
        }
    }

    /// Get the calibration in use
    pub fn calibration(&self) -> &RangingCalibration {
        &self.calibration
    }

    /// Measure the echo width of one sensor
    ///
    /// Busy-waits on the echo line. The wait for the rising edge is
    /// bounded by `echo_start_timeout_us`; the pulse itself is bounded by
    /// `max_echo_ticks`.
    pub fn measure<D: DelayNs>(&mut self, slot: SensorSlot, delay: &mut D) -> EchoOutcome {
        let cal = self.calibration;

        self.counter.reset();

        self.bank.set_trigger(slot, true);
        delay.delay_us(cal.trigger_pulse_us);
        self.bank.set_trigger(slot, false);

        // Wait for the echo to start
        let step_us = cal.poll_interval_us.max(1);
        let mut waited_us: u32 = 0;
        while !self.bank.echo_is_high(slot) {
            if waited_us >= cal.echo_start_timeout_us {
                return EchoOutcome::TimedOut(TimeoutPhase::NoRisingEdge);
            }
            delay.delay_us(cal.poll_interval_us);
            waited_us = waited_us.saturating_add(step_us);
        }

        // Count while the echo is high
        self.counter.start();
        while self.bank.echo_is_high(slot) {
            if self.counter.ticks() >= cal.max_echo_ticks {
                self.counter.stop();
                return EchoOutcome::TimedOut(TimeoutPhase::PulseTooLong);
            }
        }
        self.counter.stop();

        EchoOutcome::Measured(self.counter.ticks())
    }

    /// Measure one sensor and convert the result to a distance sample
    pub fn acquire<D: DelayNs>(&mut self, slot: SensorSlot, delay: &mut D) -> DistanceSample {
        let outcome = self.measure(slot, delay);

        #[cfg(feature = "defmt")]
        if let EchoOutcome::TimedOut(phase) = outcome {
            defmt::warn!("Sensor {} echo timeout: {}", slot.label(), phase);
        }

        DistanceSample::from_outcome(outcome, &self.calibration)
    }
}
