//! Shared test doubles
//!
//! `EchoSim` stands in for both the sensor bank and the tick counter so
//! that echo width and counter reads advance together: every counter read
//! while gated on adds `ticks_per_read`, and the echo line falls once the
//! configured width has been counted.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use rangewatch_hal::TickCounter;

use crate::slot::{SensorSlot, SENSOR_COUNT};
use crate::traits::{AlarmLine, AlarmOutput, CharacterDisplay, SensorBank};

/// Counter ticks that convert to `cm` with the reference calibration
pub fn ticks_for_cm(cm: u16) -> u32 {
    u32::from(cm) * 150
}

/// Behaviour of one simulated sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Echo rises after a few polls and lasts this many ticks
    Width(u32),
    /// Echo never rises
    Silent,
    /// Echo rises and never falls
    Stuck,
}

pub struct EchoSim {
    echoes: Cell<[Echo; SENSOR_COUNT]>,
    rise_after_polls: u32,
    ticks_per_read: u32,
    active: Cell<Option<SensorSlot>>,
    trigger_high: Cell<bool>,
    polls: Cell<u32>,
    ticks: Cell<u32>,
    running: Cell<bool>,
    pub triggers: Cell<u32>,
}

impl EchoSim {
    pub fn new(echoes: [Echo; SENSOR_COUNT]) -> Self {
        Self {
            echoes: Cell::new(echoes),
            rise_after_polls: 3,
            ticks_per_read: 10,
            active: Cell::new(None),
            trigger_high: Cell::new(false),
            polls: Cell::new(0),
            ticks: Cell::new(0),
            running: Cell::new(false),
            triggers: Cell::new(0),
        }
    }

    pub fn with_distances(cm: [u16; SENSOR_COUNT]) -> Self {
        Self::new(cm.map(|d| Echo::Width(ticks_for_cm(d))))
    }

    pub fn set_echoes(&self, echoes: [Echo; SENSOR_COUNT]) {
        self.echoes.set(echoes);
    }

    fn echo(&self, slot: SensorSlot) -> Echo {
        self.echoes.get()[slot.index()]
    }
}

impl SensorBank for &EchoSim {
    fn set_trigger(&mut self, slot: SensorSlot, high: bool) {
        if high {
            self.triggers.set(self.triggers.get() + 1);
        } else if self.trigger_high.get() {
            // Falling edge of the trigger arms the sensor
            self.active.set(Some(slot));
            self.polls.set(0);
        }
        self.trigger_high.set(high);
    }

    fn echo_is_high(&mut self, slot: SensorSlot) -> bool {
        if self.active.get() != Some(slot) {
            return false;
        }
        let echo = self.echo(slot);
        if echo == Echo::Silent {
            return false;
        }
        if self.polls.get() < self.rise_after_polls {
            self.polls.set(self.polls.get() + 1);
            return false;
        }
        match echo {
            Echo::Width(width) => self.ticks.get() < width,
            _ => true,
        }
    }
}

impl TickCounter for &EchoSim {
    fn reset(&mut self) {
        self.ticks.set(0);
    }

    fn start(&mut self) {
        self.running.set(true);
    }

    fn stop(&mut self) {
        self.running.set(false);
    }

    fn read_high(&mut self) -> u8 {
        (self.ticks.get().min(u32::from(u16::MAX)) >> 8) as u8
    }

    fn read_low(&mut self) -> u8 {
        if self.running.get() {
            self.ticks.set(self.ticks.get() + self.ticks_per_read);
        }
        self.ticks.get().min(u32::from(u16::MAX)) as u8
    }
}

/// Delay that only records how long it was asked to wait
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
        self.waits_ms.push(ms);
    }
}

/// Everything sent to the display or alarm, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Init,
    Command(u8),
    Data(u8),
    Alarm(AlarmLine, bool),
}

/// Display and alarm recorder sharing one event log
#[derive(Default)]
pub struct EventLog {
    pub events: RefCell<Vec<Event>>,
    led: Cell<bool>,
    buzzer: Cell<bool>,
}

impl EventLog {
    pub fn take(&self) -> Vec<Event> {
        self.events.take()
    }

    /// Text written with data bytes, commands ignored
    pub fn text(&self) -> std::string::String {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Data(b) => Some(*b as char),
                _ => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn alarm_events(&self) -> Vec<(AlarmLine, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Alarm(line, on) => Some((*line, *on)),
                _ => None,
            })
            .collect()
    }
}

impl CharacterDisplay for &EventLog {
    fn initialize(&mut self) {
        self.events.borrow_mut().push(Event::Init);
    }

    fn write_command(&mut self, command: u8) {
        self.events.borrow_mut().push(Event::Command(command));
    }

    fn write_data(&mut self, data: u8) {
        self.events.borrow_mut().push(Event::Data(data));
    }
}

impl AlarmOutput for &EventLog {
    fn set(&mut self, line: AlarmLine, on: bool) {
        match line {
            AlarmLine::Led => self.led.set(on),
            AlarmLine::Buzzer => self.buzzer.set(on),
        }
        self.events.borrow_mut().push(Event::Alarm(line, on));
    }

    fn is_on(&self, line: AlarmLine) -> bool {
        match line {
            AlarmLine::Led => self.led.get(),
            AlarmLine::Buzzer => self.buzzer.get(),
        }
    }
}
