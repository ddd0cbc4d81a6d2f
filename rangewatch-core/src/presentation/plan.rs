//! Per-slot presentation plans

use heapless::Vec;

use super::band::{in_chirp_band, DistanceBand};
use super::layout::{
    FieldPosition, SlotLayout, ALERT_SHIFT_STEPS, ALERT_TEXT, ALERT_TRAILER, LEGEND,
    OUT_OF_RANGE_MARKER,
};
use crate::config::PresentationTiming;
use crate::slot::SensorSlot;
use crate::traits::display::{cmd, ddram_address};
use crate::traits::AlarmLine;

/// Longest plan a single slot can produce
pub const MAX_SLOT_ACTIONS: usize = 48;

/// Chirps beyond this count are dropped
pub const MAX_CHIRPS: u8 = 4;

/// One step of a presentation plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Send an instruction byte
    Command(u8),
    /// Write a run of character codes
    Text(&'static [u8]),
    /// Write one character code
    Glyph(u8),
    /// Switch an alarm output
    Alarm(AlarmLine, bool),
    /// Wait, in milliseconds
    Pause(u32),
}

/// Actions for one slot's turn
pub type SlotPlan = Vec<Action, MAX_SLOT_ACTIONS>;

/// Actions that draw a number in 0..=99 at the cursor
///
/// The tens digit is skipped below 10. After it, the cursor is stepped
/// right and back left before the ones digit is written.
pub fn plan_number(value: u8, digit_step_settle_ms: u32) -> Vec<Action, 6> {
    let value = value.min(99);
    let tens = value / 10;
    let ones = value % 10;

    let mut actions = Vec::new();
    if tens != 0 {
        // Capacity is exactly the tens path
        let _ = actions.push(Action::Glyph(b'0' + tens));
        let _ = actions.push(Action::Command(cmd::CURSOR_RIGHT));
        let _ = actions.push(Action::Pause(digit_step_settle_ms));
        let _ = actions.push(Action::Command(cmd::CURSOR_LEFT));
        let _ = actions.push(Action::Pause(digit_step_settle_ms));
    }
    let _ = actions.push(Action::Glyph(b'0' + ones));
    actions
}

/// Plans the screen and alarm for each slot
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    timing: PresentationTiming,
}

impl Presenter {
    /// Create a presenter with the given delays
    pub fn new(timing: PresentationTiming) -> Self {
        Self { timing }
    }

    /// Get the delays in use
    pub fn timing(&self) -> &PresentationTiming {
        &self.timing
    }

    /// Plan the boot legend
    pub fn plan_legend(&self) -> Vec<Action, 6> {
        let mut actions = Vec::new();
        for (row, text) in (0u8..).zip(LEGEND) {
            let _ = actions.push(Action::Command(ddram_address(row, 0)));
            let _ = actions.push(Action::Text(text));
            let _ = actions.push(Action::Pause(self.timing.legend_settle_ms));
        }
        actions
    }

    /// Plan one slot's turn
    ///
    /// `angle` is the bearing of the pair this slot completes; it is drawn
    /// only by slots that have a bearing field.
    pub fn plan_slot(&self, slot: SensorSlot, cm: u16, angle: Option<u8>) -> SlotPlan {
        let layout = SlotLayout::of(slot);
        let t = &self.timing;
        let mut plan = PlanBuilder::default();

        if let (Some(field), Some(angle)) = (layout.angle, angle) {
            plan.cursor(field);
            plan.extend(&plan_number(angle, t.digit_step_settle_ms));
            plan.pause(t.angle_settle_ms);
        }

        plan.cursor(layout.distance);
        plan.pause(layout.distance_settle_ms);

        match DistanceBand::classify(cm) {
            DistanceBand::Alert => {
                plan.push(Action::Text(ALERT_TEXT));
                plan.push(Action::Alarm(AlarmLine::Led, true));
                plan.push(Action::Alarm(AlarmLine::Buzzer, true));
                plan.pause(t.alert_hold_ms);
                plan.push(Action::Alarm(AlarmLine::Led, false));
                plan.push(Action::Alarm(AlarmLine::Buzzer, false));
                for _ in 0..ALERT_SHIFT_STEPS {
                    plan.push(Action::Command(cmd::CURSOR_LEFT));
                }
                plan.pause(t.alert_shift_settle_ms);
                plan.push(Action::Text(ALERT_TRAILER));
                plan.pause(t.field_settle_ms);
            }
            DistanceBand::Numeric(n) => {
                plan.extend(&plan_number(n, t.digit_step_settle_ms));
                plan.pause(t.field_settle_ms);
            }
            DistanceBand::OutOfRange => {
                plan.push(Action::Text(OUT_OF_RANGE_MARKER));
                plan.pause(t.field_settle_ms);
            }
        }

        if in_chirp_band(cm) {
            for _ in 0..t.chirp_count.min(MAX_CHIRPS) {
                plan.push(Action::Alarm(AlarmLine::Buzzer, true));
                plan.pause(t.chirp_on_ms);
                plan.push(Action::Alarm(AlarmLine::Buzzer, false));
                plan.pause(t.chirp_off_ms);
            }
        }

        plan.actions
    }
}

#[derive(Default)]
struct PlanBuilder {
    actions: SlotPlan,
}

impl PlanBuilder {
    fn push(&mut self, action: Action) {
        // The longest slot (angle, alert and chirps) stays under capacity
        let _ = self.actions.push(action);
    }

    fn extend(&mut self, actions: &[Action]) {
        for &action in actions {
            self.push(action);
        }
    }

    fn cursor(&mut self, at: FieldPosition) {
        self.push(Action::Command(ddram_address(at.row, at.col)));
    }

    fn pause(&mut self, ms: u32) {
        self.push(Action::Pause(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn presenter() -> Presenter {
        Presenter::new(PresentationTiming::REFERENCE)
    }

    fn slot(i: u8) -> SensorSlot {
        SensorSlot::new(i).unwrap()
    }

    fn alarm_steps(plan: &[Action]) -> usize {
        plan.iter().filter(|a| matches!(a, Action::Alarm(..))).count()
    }

    #[test]
    fn test_numeric_two_digits() {
        let actions = plan_number(30, 20);
        assert_eq!(
            actions.as_slice(),
            &[
                Action::Glyph(b'3'),
                Action::Command(cmd::CURSOR_RIGHT),
                Action::Pause(20),
                Action::Command(cmd::CURSOR_LEFT),
                Action::Pause(20),
                Action::Glyph(b'0'),
            ]
        );
    }

    #[test]
    fn test_numeric_single_digit() {
        assert_eq!(plan_number(7, 20).as_slice(), &[Action::Glyph(b'7')]);
        assert_eq!(plan_number(0, 20).as_slice(), &[Action::Glyph(b'0')]);
    }

    #[test]
    fn test_slot_zero_numeric() {
        let plan = presenter().plan_slot(slot(0), 30, None);
        let mut expected: Vec<Action, 16> = Vec::new();
        expected.extend_from_slice(&[Action::Command(0x81), Action::Pause(40)]).unwrap();
        expected.extend_from_slice(&plan_number(30, 20)).unwrap();
        expected.push(Action::Pause(20)).unwrap();
        assert_eq!(plan.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_alert_sequence() {
        let plan = presenter().plan_slot(slot(2), 3, None);
        assert_eq!(
            plan.as_slice(),
            &[
                Action::Command(0xC1),
                Action::Pause(30),
                Action::Text(b"Alert"),
                Action::Alarm(AlarmLine::Led, true),
                Action::Alarm(AlarmLine::Buzzer, true),
                Action::Pause(1000),
                Action::Alarm(AlarmLine::Led, false),
                Action::Alarm(AlarmLine::Buzzer, false),
                Action::Command(0x10),
                Action::Command(0x10),
                Action::Command(0x10),
                Action::Command(0x10),
                Action::Command(0x10),
                Action::Pause(2),
                Action::Text(b"  cm "),
                Action::Pause(20),
            ]
        );
    }

    #[test]
    fn test_out_of_range() {
        for cm in [0, 100, 150, u16::MAX] {
            let plan = presenter().plan_slot(slot(0), cm, None);
            assert_eq!(
                plan.as_slice(),
                &[
                    Action::Command(0x81),
                    Action::Pause(40),
                    Action::Text(b" -- "),
                    Action::Pause(20),
                ]
            );
        }
    }

    #[test]
    fn test_chirp_band() {
        let plan = presenter().plan_slot(slot(0), 8, None);
        let tail = &plan[plan.len() - 8..];
        assert_eq!(
            tail,
            &[
                Action::Alarm(AlarmLine::Buzzer, true),
                Action::Pause(30),
                Action::Alarm(AlarmLine::Buzzer, false),
                Action::Pause(20),
                Action::Alarm(AlarmLine::Buzzer, true),
                Action::Pause(30),
                Action::Alarm(AlarmLine::Buzzer, false),
                Action::Pause(20),
            ]
        );
        assert!(plan.contains(&Action::Glyph(b'8')));
    }

    #[test]
    fn test_five_alerts_and_chirps() {
        let plan = presenter().plan_slot(slot(0), 5, None);
        assert!(plan.contains(&Action::Text(ALERT_TEXT)));
        // Four alert switches plus four chirp switches
        assert_eq!(alarm_steps(&plan), 8);
    }

    #[test]
    fn test_no_alarm_outside_bands() {
        for cm in [0, 11, 30, 99, 150] {
            assert_eq!(alarm_steps(&presenter().plan_slot(slot(1), cm, Some(10))), 0);
        }
    }

    #[test]
    fn test_angle_drawn_before_distance() {
        let plan = presenter().plan_slot(slot(1), 8, Some(56));
        assert_eq!(plan[0], Action::Command(0x8E));
        assert_eq!(plan[1], Action::Glyph(b'5'));
        assert_eq!(plan[6], Action::Glyph(b'6'));
        assert_eq!(plan[7], Action::Pause(40));
        assert_eq!(plan[8], Action::Command(0x88));
        assert_eq!(plan[9], Action::Pause(40));
    }

    #[test]
    fn test_angle_ignored_without_field() {
        let with = presenter().plan_slot(slot(2), 30, Some(56));
        let without = presenter().plan_slot(slot(2), 30, None);
        assert_eq!(with, without);
    }

    #[test]
    fn test_longest_plan_fits() {
        let timing = PresentationTiming {
            chirp_count: u8::MAX,
            ..PresentationTiming::REFERENCE
        };
        let plan = Presenter::new(timing).plan_slot(slot(3), 5, Some(89));
        // Angle and anchor 10, alert 14, four chirps 16
        assert_eq!(plan.len(), 40);
        assert_eq!(plan.last(), Some(&Action::Pause(20)));
    }

    #[test]
    fn test_legend_plan() {
        let legend = presenter().plan_legend();
        assert_eq!(
            legend.as_slice(),
            &[
                Action::Command(0x80),
                Action::Text(b"A  cm  B  cm  "),
                Action::Pause(40),
                Action::Command(0xC0),
                Action::Text(b"C  cm  D  cm  "),
                Action::Pause(40),
            ]
        );
    }

    proptest! {
        #[test]
        fn number_is_reconstructed(n in 0u8..=99) {
            let actions = plan_number(n, 20);
            let digits: std::vec::Vec<u8> = actions
                .iter()
                .filter_map(|a| match a {
                    Action::Glyph(g) => Some(g - b'0'),
                    _ => None,
                })
                .collect();

            let value = digits.iter().fold(0u8, |acc, d| acc * 10 + d);
            prop_assert_eq!(value, n);
            prop_assert_eq!(digits.len() == 1, n < 10);
        }
    }
}
