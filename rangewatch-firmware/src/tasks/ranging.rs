//! Ranging task
//!
//! Owns the rangefinder and the outer loop. A pass runs to completion
//! with blocking delays, so the settle between passes is the only point
//! where the task yields. That makes a pass hold the executor for
//! seconds: every LCD nibble waits out the enable hold (10 ms on the
//! reference board, so 20 ms per byte) and an alert adds its full hold.
//! Other tasks, the main heartbeat included, only run in the settle gap.

use defmt::*;
use embassy_time::{Delay, Timer};

use rangewatch_core::Rangefinder;
use rangewatch_display::Mirrored;
use rangewatch_drivers::{GpioAlarm, Hd44780, PinSensorBank};
use rangewatch_hal_rp2040::{EchoCounter, RpInput, RpOutput};

use crate::channels::PASS_REPORT;

/// The rangefinder as wired on this board
pub type BoardRangefinder = Rangefinder<
    PinSensorBank<RpOutput, RpInput>,
    EchoCounter,
    Mirrored<Hd44780<RpOutput, Delay>>,
    GpioAlarm<RpOutput>,
    Delay,
>;

/// Ranging task - start the display, then run passes forever
#[embassy_executor::task]
pub async fn ranging_task(mut rangefinder: BoardRangefinder) {
    info!("Ranging task started");

    rangefinder.start();

    loop {
        let report = rangefinder.run_pass();

        debug!(
            "Pass {}: {} angles={} alerts={} timeouts={}",
            report.pass, report.samples, report.angles, report.alerts, report.timeouts
        );
        rangefinder.display_mut().log_rows();

        PASS_REPORT.signal(report);

        let settle_ms = rangefinder.timing().pass_settle_ms;
        Timer::after_millis(u64::from(settle_ms)).await;
    }
}
