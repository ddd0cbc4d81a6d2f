//! Alarm output trait
//!
//! The near-field alarm is two outputs: an LED and a buzzer. A close
//! obstacle lights both for a long hold; the boundary band only chirps
//! the buzzer.

/// One of the alarm outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmLine {
    /// Alert LED
    Led,
    /// Piezo buzzer
    Buzzer,
}

/// Trait for alarm output control
///
/// Implementations drive GPIOs (directly or via a transistor).
pub trait AlarmOutput {
    /// Turn one alarm output on or off
    fn set(&mut self, line: AlarmLine, on: bool);

    /// Check if an alarm output is currently on
    fn is_on(&self, line: AlarmLine) -> bool;

    /// Turn every alarm output off
    fn silence(&mut self) {
        self.set(AlarmLine::Led, false);
        self.set(AlarmLine::Buzzer, false);
    }
}

impl<T: AlarmOutput + ?Sized> AlarmOutput for &mut T {
    fn set(&mut self, line: AlarmLine, on: bool) {
        (**self).set(line, on);
    }

    fn is_on(&self, line: AlarmLine) -> bool {
        (**self).is_on(line)
    }
}
