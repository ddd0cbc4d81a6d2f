//! Rangewatch - Four-Sensor Ultrasonic Ranging Display Firmware
//!
//! Main firmware binary for RP2040-based boards. Four ultrasonic sensors
//! are read in turn, each pair yields a bearing, and the results go to a
//! 16x2 character LCD with an LED and buzzer for near obstacles.
//!
//! Pins and calibration come from board.toml, compiled in as `BOARD`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Pull};
use embassy_time::{Delay, Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use rangewatch_core::config::PinConfig;
use rangewatch_core::ranging::RangingEngine;
use rangewatch_core::Rangefinder;
use rangewatch_display::Mirrored;
use rangewatch_drivers::{GpioAlarm, Hd44780, PinSensorBank};
use rangewatch_hal_rp2040::{EchoCounter, PinBank, PinError, RpOutput};

use crate::channels::PASS_REPORT;
use crate::config::BOARD;

mod channels;
mod config;
mod tasks;

/// Heartbeat interval for the pass summary log
///
/// A pass blocks the executor for a few seconds, so ticks land in the
/// settle after a pass rather than on the interval. Each tick still logs
/// the latest finished pass.
const HEARTBEAT_SECS: u64 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rangewatch firmware starting...");

    // build.rs checked board.toml; preset fields it did not override are
    // only checked here
    if let Err(e) = BOARD.validate() {
        error!("Invalid board configuration: {}", e);
        defmt::panic!("invalid board configuration");
    }

    let p = embassy_rp::init(Default::default());
    let mut pins = PinBank::new(p);
    info!("Peripherals initialized");

    let rangefinder = match build_rangefinder(&mut pins) {
        Ok(rangefinder) => rangefinder,
        Err(e) => {
            error!("Pin allocation failed: {}", e);
            defmt::panic!("pin allocation failed");
        }
    };
    info!(
        "Rangefinder assembled: baseline {} cm, enable hold {} us",
        BOARD.calibration.baseline_cm, BOARD.lcd.enable_hold_us
    );

    spawner.spawn(tasks::ranging_task(rangefinder)).unwrap();

    info!("All tasks spawned, firmware running");

    let mut heartbeat = Ticker::every(Duration::from_secs(HEARTBEAT_SECS));
    loop {
        heartbeat.next().await;

        match PASS_REPORT.try_take() {
            Some(report) => match report.nearest() {
                Some((slot, cm)) => info!(
                    "Pass {}: nearest {} cm at sensor {}, {} alerts, {} timeouts",
                    report.pass,
                    cm,
                    slot.label(),
                    report.alerts,
                    report.timeouts
                ),
                None => info!(
                    "Pass {}: nothing in range, {} timeouts",
                    report.pass, report.timeouts
                ),
            },
            None => warn!("No pass completed since last heartbeat"),
        }
    }
}

/// Claim every pin named in `BOARD` and wire up the rangefinder
fn build_rangefinder(pins: &mut PinBank) -> Result<tasks::BoardRangefinder, PinError> {
    let sensors = &BOARD.sensors;
    let triggers = [
        pins.output(sensors[0].trigger, Level::Low)?,
        pins.output(sensors[1].trigger, Level::Low)?,
        pins.output(sensors[2].trigger, Level::Low)?,
        pins.output(sensors[3].trigger, Level::Low)?,
    ];
    // Pull-down keeps an unplugged sensor reading as no echo
    let echoes = [
        pins.input(sensors[0].echo, Pull::Down)?,
        pins.input(sensors[1].echo, Pull::Down)?,
        pins.input(sensors[2].echo, Pull::Down)?,
        pins.input(sensors[3].echo, Pull::Down)?,
    ];
    let engine = RangingEngine::new(
        PinSensorBank::new(triggers, echoes),
        EchoCounter::new(),
        BOARD.calibration,
    );

    let lcd = &BOARD.lcd;
    let data = [
        pins.output(lcd.data[0], Level::Low)?,
        pins.output(lcd.data[1], Level::Low)?,
        pins.output(lcd.data[2], Level::Low)?,
        pins.output(lcd.data[3], Level::Low)?,
    ];
    let display = Hd44780::new(
        pins.output(lcd.rs, Level::Low)?,
        pins.output(lcd.en, Level::Low)?,
        data,
        Delay,
    )
    .with_enable_hold_us(lcd.enable_hold_us);

    let alarm = GpioAlarm::from_config(
        alarm_output(pins, BOARD.alarm.led)?,
        alarm_output(pins, BOARD.alarm.buzzer)?,
        &BOARD.alarm,
    );

    Ok(Rangefinder::new(
        engine,
        Mirrored::new(display),
        alarm,
        Delay,
        BOARD.timing,
    ))
}

/// Alarm lines come up in their off state
fn alarm_output(pins: &mut PinBank, pin: PinConfig) -> Result<RpOutput, PinError> {
    pins.output(pin.pin, Level::from(pin.inverted))
}
