//! GPIO wrappers
//!
//! Newtypes over embassy-rp pins implementing the `rangewatch-hal` pin
//! traits. RP2040 GPIO access cannot fail, so nothing is swallowed here.

use embassy_rp::gpio::{self, Input, Output};
use rangewatch_hal::{InputPin, Level, OutputPin};

fn to_rp(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

fn from_rp(level: gpio::Level) -> Level {
    match level {
        gpio::Level::Low => Level::Low,
        gpio::Level::High => Level::High,
    }
}

/// Push-pull output
pub struct RpOutput(Output<'static>);

impl RpOutput {
    /// Wrap a configured output
    pub fn new(output: Output<'static>) -> Self {
        Self(output)
    }
}

impl OutputPin for RpOutput {
    fn set_level(&mut self, level: Level) {
        self.0.set_level(to_rp(level));
    }

    fn level(&self) -> Level {
        from_rp(self.0.get_output_level())
    }
}

/// Digital input
pub struct RpInput(Input<'static>);

impl RpInput {
    /// Wrap a configured input
    pub fn new(input: Input<'static>) -> Self {
        Self(input)
    }
}

impl InputPin for RpInput {
    fn level(&self) -> Level {
        from_rp(self.0.get_level())
    }
}
