//! HD44780 character LCD on a 4-bit parallel bus
//!
//! Each byte goes out as two nibbles, high nibble first, on D4..D7. RS
//! selects the instruction register (low) or the data register (high) and
//! is set before EN is raised. The controller latches a nibble on the
//! falling edge of EN, so EN is held high for the enable hold time.
//!
//! The bus is write-only: R/W is tied low and the busy flag is never
//! polled, so the enable hold also has to cover instruction execution
//! time. The reference board uses 10 ms, which is generous for every
//! instruction including clear.

use embedded_hal::delay::DelayNs;
use rangewatch_core::config::LcdConfig;
use rangewatch_core::traits::display::INIT_SEQUENCE;
use rangewatch_core::traits::CharacterDisplay;
use rangewatch_hal::{Level, OutputPin};

/// Settle after the instruction sequence in [`Hd44780::initialize`]
pub const INIT_SETTLE_MS: u32 = 20;

/// HD44780 driver
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4..D7
    data: [P; 4],
    delay: D,
    enable_hold_us: u32,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Create a new driver with the default enable hold
    ///
    /// EN is driven low immediately so nothing is latched while the
    /// other lines settle.
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        let mut lcd = Self {
            rs,
            en,
            data,
            delay,
            enable_hold_us: LcdConfig::DEFAULT_ENABLE_HOLD_US,
        };
        lcd.en.set_low();
        lcd
    }

    /// Set how long EN is held high per nibble
    pub fn with_enable_hold_us(mut self, enable_hold_us: u32) -> Self {
        self.enable_hold_us = enable_hold_us;
        self
    }

    /// Enable hold in use, in microseconds
    pub fn enable_hold_us(&self) -> u32 {
        self.enable_hold_us
    }

    /// Give the pins and the delay back
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }

    fn write_nibble(&mut self, register: Level, nibble: u8) {
        for (bit, line) in self.data.iter_mut().enumerate() {
            line.set_level(Level::from_high(nibble & (1 << bit) != 0));
        }
        self.rs.set_level(register);

        self.en.set_high();
        self.delay.delay_us(self.enable_hold_us);
        self.en.set_low();
    }

    fn write_byte(&mut self, register: Level, byte: u8) {
        self.write_nibble(register, byte >> 4);
        self.write_nibble(register, byte & 0x0F);
    }
}

impl<P: OutputPin, D: DelayNs> CharacterDisplay for Hd44780<P, D> {
    fn initialize(&mut self) {
        for command in INIT_SEQUENCE {
            self.write_command(command);
        }
        self.delay.delay_ms(INIT_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("HD44780 initialized, enable hold {} us", self.enable_hold_us);
    }

    fn write_command(&mut self, command: u8) {
        self.write_byte(Level::Low, command);
    }

    fn write_data(&mut self, data: u8) {
        self.write_byte(Level::High, data);
    }
}
