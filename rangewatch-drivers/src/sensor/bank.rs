//! Sensor bank on plain GPIOs

use rangewatch_core::traits::SensorBank;
use rangewatch_core::{SensorSlot, SENSOR_COUNT};
use rangewatch_hal::{InputPin, Level, OutputPin};

/// Four trigger outputs and four echo inputs, indexed by slot
pub struct PinSensorBank<O, I> {
    triggers: [O; SENSOR_COUNT],
    echoes: [I; SENSOR_COUNT],
}

impl<O: OutputPin, I: InputPin> PinSensorBank<O, I> {
    /// Create a new bank; every trigger is driven low
    pub fn new(mut triggers: [O; SENSOR_COUNT], echoes: [I; SENSOR_COUNT]) -> Self {
        for trigger in triggers.iter_mut() {
            trigger.set_low();
        }
        Self { triggers, echoes }
    }
}

impl<O: OutputPin, I: InputPin> SensorBank for PinSensorBank<O, I> {
    fn set_trigger(&mut self, slot: SensorSlot, high: bool) {
        self.triggers[slot.index()].set_level(Level::from_high(high));
    }

    fn echo_is_high(&mut self, slot: SensorSlot) -> bool {
        self.echoes[slot.index()].is_high()
    }
}
