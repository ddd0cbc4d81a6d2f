//! Acquisition cycle
//!
//! One pass visits the four slots in order. For each slot the cycle
//! measures, converts, derives the pair bearing once both samples of a
//! pair are fresh, then plays the slot's presentation plan. Nothing is
//! carried from one pass to the next except the pass counter.
//!
//! The caller owns the outer loop: `start` once, then `run_pass` forever
//! with `timing().pass_settle_ms` between passes. The firmware's ranging
//! task does this so the settle can yield to the executor.

use embedded_hal::delay::DelayNs;
use rangewatch_hal::TickCounter;

use crate::bearing::bearing_angle;
use crate::config::PresentationTiming;
use crate::presentation::{execute, DistanceBand, Presenter};
use crate::ranging::{DistanceSample, RangingEngine};
use crate::slot::{SensorSlot, PAIR_COUNT, SENSOR_COUNT};
use crate::traits::{AlarmOutput, CharacterDisplay, SensorBank};

/// Summary of one acquisition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassReport {
    /// Sequence number, starting at 1
    pub pass: u32,
    /// Distance per slot
    pub samples: [DistanceSample; SENSOR_COUNT],
    /// Bearing per pair, in degrees
    pub angles: [u8; PAIR_COUNT],
    /// Slots that raised the alert
    pub alerts: u8,
    /// Slots whose echo timed out
    pub timeouts: u8,
}

impl PassReport {
    /// Closest in-range distance and the slot that saw it
    pub fn nearest(&self) -> Option<(SensorSlot, u16)> {
        SensorSlot::ALL
            .iter()
            .map(|&slot| (slot, self.samples[slot.index()].centimeters()))
            .filter(|&(_, cm)| DistanceBand::classify(cm) != DistanceBand::OutOfRange)
            .min_by_key(|&(_, cm)| cm)
    }
}

/// The ranging display: engine, LCD, alarm and delay
pub struct Rangefinder<B, C, Dp, A, D> {
    engine: RangingEngine<B, C>,
    display: Dp,
    alarm: A,
    delay: D,
    presenter: Presenter,
    passes: u32,
}

impl<B, C, Dp, A, D> Rangefinder<B, C, Dp, A, D>
where
    B: SensorBank,
    C: TickCounter,
    Dp: CharacterDisplay,
    A: AlarmOutput,
    D: DelayNs,
{
    /// Create a new rangefinder
    pub fn new(
        engine: RangingEngine<B, C>,
        display: Dp,
        alarm: A,
        delay: D,
        timing: PresentationTiming,
    ) -> Self {
        Self {
            engine,
            display,
            alarm,
            delay,
            presenter: Presenter::new(timing),
            passes: 0,
        }
    }

    /// Get the display
    pub fn display(&self) -> &Dp {
        &self.display
    }

    /// Get the display mutably
    pub fn display_mut(&mut self) -> &mut Dp {
        &mut self.display
    }

    /// Presentation timing in use
    pub fn timing(&self) -> &PresentationTiming {
        self.presenter.timing()
    }

    /// Get the alarm output
    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    /// Get the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Number of completed passes
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Power-up sequence: settle, bring up the LCD and draw the legend
    pub fn start(&mut self) {
        let timing = *self.presenter.timing();

        self.alarm.silence();
        self.delay.delay_ms(timing.power_up_settle_ms);

        self.display.initialize();
        self.delay.delay_ms(timing.display_init_settle_ms);

        // The counter needs no setup beyond its reset, only the settle
        self.delay.delay_ms(timing.timer_setup_settle_ms);

        let legend = self.presenter.plan_legend();
        execute(&legend, &mut self.display, &mut self.alarm, &mut self.delay);

        #[cfg(feature = "defmt")]
        defmt::info!("Legend drawn, ranging");
    }

    /// Run one acquisition pass over all four slots
    ///
    /// Does not include the settle that follows a pass; the caller waits
    /// `timing().pass_settle_ms` before the next one.
    pub fn run_pass(&mut self) -> PassReport {
        let timing = *self.presenter.timing();
        let baseline_cm = self.engine.calibration().baseline_cm;

        // Samples start at zero every pass
        let mut report = PassReport::default();

        self.delay.delay_ms(timing.pass_start_ms);

        for slot in SensorSlot::ALL {
            self.delay.delay_ms(timing.slot_start_ms);

            let sample = self.engine.acquire(slot, &mut self.delay);
            report.samples[slot.index()] = sample;
            if sample.is_no_echo() {
                report.timeouts += 1;
            }

            let angle = slot.completes_pair().map(|pair| {
                let angle = bearing_angle(
                    report.samples[pair.first().index()].centimeters(),
                    report.samples[pair.second().index()].centimeters(),
                    baseline_cm,
                );
                report.angles[pair.index()] = angle;
                angle
            });

            let cm = sample.centimeters();
            if DistanceBand::classify(cm).is_alert() {
                report.alerts += 1;

                #[cfg(feature = "defmt")]
                defmt::warn!("Obstacle at sensor {}: {} cm", slot.label(), cm);
            }

            let plan = self.presenter.plan_slot(slot, cm, angle);
            execute(&plan, &mut self.display, &mut self.alarm, &mut self.delay);

            self.delay.delay_ms(timing.slot_settle_ms);
        }

        self.passes = self.passes.wrapping_add(1);
        report.pass = self.passes;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangingCalibration;
    use crate::testing::{Echo, EchoSim, Event, EventLog, RecordingDelay};
    use crate::traits::AlarmLine;

    type TestRangefinder<'a> =
        Rangefinder<&'a EchoSim, &'a EchoSim, &'a EventLog, &'a EventLog, RecordingDelay>;

    fn rangefinder<'a>(sim: &'a EchoSim, log: &'a EventLog) -> TestRangefinder<'a> {
        Rangefinder::new(
            RangingEngine::new(sim, sim, RangingCalibration::REFERENCE),
            log,
            log,
            RecordingDelay::default(),
            PresentationTiming::REFERENCE,
        )
    }

    #[test]
    fn test_start_draws_legend() {
        let sim = EchoSim::with_distances([30; 4]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        rf.start();

        let events = log.take();
        assert_eq!(
            events[..2],
            [
                Event::Alarm(AlarmLine::Led, false),
                Event::Alarm(AlarmLine::Buzzer, false),
            ]
        );
        assert_eq!(events[2], Event::Init);
        assert_eq!(events[3], Event::Command(0x80));
        assert_eq!(events[18], Event::Command(0xC0));
        assert_eq!(rf.delay().waits_ms, [50, 50, 20, 40, 40]);
        assert_eq!(sim.triggers.get(), 0);
    }

    #[test]
    fn test_pass_report() {
        let sim = EchoSim::with_distances([30, 3, 150, 8]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        let report = rf.run_pass();

        assert_eq!(report.pass, 1);
        assert_eq!(
            report.samples,
            [
                DistanceSample::Centimeters(30),
                DistanceSample::Centimeters(3),
                DistanceSample::Centimeters(150),
                DistanceSample::Centimeters(8),
            ]
        );
        // atan(27 / 8) = 73.5, atan(142 / 8) = 86.8
        assert_eq!(report.angles, [73, 86]);
        assert_eq!(report.alerts, 1);
        assert_eq!(report.timeouts, 0);
        assert_eq!(report.nearest(), Some((SensorSlot::ALL[1], 3)));
        assert_eq!(sim.triggers.get(), 4);
    }

    #[test]
    fn test_pass_screen_output() {
        let sim = EchoSim::with_distances([30, 3, 150, 8]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        rf.run_pass();

        // Angles are drawn before the distance of the slot completing a pair
        assert_eq!(log.text(), "3073Alert  cm  -- 868");
        assert_eq!(
            log.alarm_events(),
            [
                (AlarmLine::Led, true),
                (AlarmLine::Buzzer, true),
                (AlarmLine::Led, false),
                (AlarmLine::Buzzer, false),
                (AlarmLine::Buzzer, true),
                (AlarmLine::Buzzer, false),
                (AlarmLine::Buzzer, true),
                (AlarmLine::Buzzer, false),
            ]
        );
    }

    #[test]
    fn test_pair_bearing_uses_fresh_samples() {
        let sim = EchoSim::with_distances([20, 8, 40, 40]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        let report = rf.run_pass();
        assert_eq!(report.angles, [56, 0]);

        sim.set_echoes([Echo::Width(4500); 4]);
        let report = rf.run_pass();
        assert_eq!(report.pass, 2);
        assert_eq!(report.angles, [0, 0]);
    }

    #[test]
    fn test_timed_out_slot_renders_out_of_range() {
        let sim = EchoSim::new([Echo::Silent, Echo::Width(4500), Echo::Stuck, Echo::Width(4500)]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        let report = rf.run_pass();

        assert_eq!(report.timeouts, 2);
        assert_eq!(report.samples[0], DistanceSample::NoEcho);
        assert_eq!(report.samples[2], DistanceSample::NoEcho);
        // A missing echo counts as 0 cm for the bearing
        assert_eq!(report.angles, [bearing_angle(0, 30, 8.0); 2]);
        assert!(log.text().starts_with(" -- "));
        assert!(log.alarm_events().is_empty());
        assert_eq!(report.nearest(), Some((SensorSlot::ALL[1], 30)));
    }

    #[test]
    fn test_alert_retriggers_every_pass() {
        let sim = EchoSim::with_distances([3, 50, 50, 50]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        for _ in 0..3 {
            assert_eq!(rf.run_pass().alerts, 1);
        }
        let holds = rf.delay().waits_ms.iter().filter(|&&ms| ms == 1000).count();
        assert_eq!(holds, 3);
        assert_eq!(rf.passes(), 3);
    }

    #[test]
    fn test_pass_pacing() {
        let sim = EchoSim::with_distances([50, 50, 50, 50]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        rf.run_pass();

        let waits = &rf.delay().waits_ms;
        assert_eq!(waits[0], 20);
        assert_eq!(waits.iter().filter(|&&ms| ms == 5).count(), 4);
        assert_eq!(waits.iter().filter(|&&ms| ms == 100).count(), 4);
        assert_eq!(*waits.last().unwrap(), 100);
    }

    #[test]
    fn test_consecutive_passes() {
        let sim = EchoSim::with_distances([30, 30, 30, 30]);
        let log = EventLog::default();
        let mut rf = rangefinder(&sim, &log);

        rf.start();
        for expected in 1..=3 {
            let report = rf.run_pass();
            assert_eq!(report.pass, expected);
            assert_eq!(report.samples, [DistanceSample::Centimeters(30); 4]);
        }

        assert_eq!(rf.passes(), 3);
        assert_eq!(rf.timing().pass_settle_ms, 100);
        assert_eq!(sim.triggers.get(), 12);
    }
}
