//! Plan execution

use embedded_hal::delay::DelayNs;

use super::plan::Action;
use crate::traits::{AlarmOutput, CharacterDisplay};

/// Play a plan against the display, the alarm and a delay, in order
pub fn execute<Dp, A, D>(actions: &[Action], display: &mut Dp, alarm: &mut A, delay: &mut D)
where
    Dp: CharacterDisplay,
    A: AlarmOutput,
    D: DelayNs,
{
    for action in actions {
        match *action {
            Action::Command(command) => display.write_command(command),
            Action::Text(text) => display.write_string(text),
            Action::Glyph(glyph) => display.write_data(glyph),
            Action::Alarm(line, on) => alarm.set(line, on),
            Action::Pause(ms) => delay.delay_ms(ms),
        }
    }
}
