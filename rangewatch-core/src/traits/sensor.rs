//! Ultrasonic sensor bank trait

use crate::slot::SensorSlot;

/// The trigger and echo lines of all four sensors
///
/// Only one slot is ever active at a time; the ranging engine owns the
/// bank for the duration of a measurement.
pub trait SensorBank {
    /// Drive the trigger line of `slot`
    fn set_trigger(&mut self, slot: SensorSlot, high: bool);

    /// Sample the echo line of `slot`
    ///
    /// Takes `&mut self` because some implementations count or latch reads.
    fn echo_is_high(&mut self, slot: SensorSlot) -> bool;
}

impl<T: SensorBank + ?Sized> SensorBank for &mut T {
    fn set_trigger(&mut self, slot: SensorSlot, high: bool) {
        (**self).set_trigger(slot, high);
    }

    fn echo_is_high(&mut self, slot: SensorSlot) -> bool {
        (**self).echo_is_high(slot)
    }
}
