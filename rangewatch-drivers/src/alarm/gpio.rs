//! GPIO alarm output
//!
//! LED and buzzer each on their own GPIO, driven directly or through a
//! transistor. Either line can be active-low.

use rangewatch_core::config::AlarmPins;
use rangewatch_core::traits::{AlarmLine, AlarmOutput};
use rangewatch_hal::{Level, OutputPin};

/// One alarm line with its polarity
struct Channel<P> {
    pin: P,
    /// If true, on = pin LOW
    inverted: bool,
    /// Current logical state (true = on)
    on: bool,
}

impl<P: OutputPin> Channel<P> {
    fn new(pin: P, inverted: bool) -> Self {
        let mut channel = Self {
            pin,
            inverted,
            on: false,
        };
        // Ensure the alarm starts off
        channel.set(false);
        channel
    }

    fn set(&mut self, on: bool) {
        self.on = on;
        // Normal: on → high; inverted: on → low
        self.pin.set_level(Level::from_high(on != self.inverted));
    }
}

/// GPIO alarm output
pub struct GpioAlarm<P> {
    led: Channel<P>,
    buzzer: Channel<P>,
}

impl<P: OutputPin> GpioAlarm<P> {
    /// Create a new alarm output, both lines off
    ///
    /// # Arguments
    /// - `led`, `buzzer`: The GPIO pins to control
    /// - `led_inverted`, `buzzer_inverted`: If true, the line is ON when
    ///   its pin is LOW
    pub fn new(led: P, led_inverted: bool, buzzer: P, buzzer_inverted: bool) -> Self {
        Self {
            led: Channel::new(led, led_inverted),
            buzzer: Channel::new(buzzer, buzzer_inverted),
        }
    }

    /// Create an alarm output with the polarity from the board config
    pub fn from_config(led: P, buzzer: P, pins: &AlarmPins) -> Self {
        Self::new(led, pins.led.inverted, buzzer, pins.buzzer.inverted)
    }

    fn channel(&self, line: AlarmLine) -> &Channel<P> {
        match line {
            AlarmLine::Led => &self.led,
            AlarmLine::Buzzer => &self.buzzer,
        }
    }
}

impl<P: OutputPin> AlarmOutput for GpioAlarm<P> {
    fn set(&mut self, line: AlarmLine, on: bool) {
        #[cfg(feature = "defmt")]
        if self.is_on(line) != on {
            defmt::trace!("Alarm {} -> {}", line, on);
        }

        match line {
            AlarmLine::Led => self.led.set(on),
            AlarmLine::Buzzer => self.buzzer.set(on),
        }
    }

    fn is_on(&self, line: AlarmLine) -> bool {
        self.channel(line).on
    }
}
