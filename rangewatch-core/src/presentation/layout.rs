//! Screen layout
//!
//! ```text
//!       0123456789012345
//! row 0 A30cm  B8 cm  56
//! row 1 C --   D12cm  31
//! ```
//!
//! Each row holds two distance fields between a sensor letter and the
//! "cm" label, and the bearing of that row's pair in the last two columns.

use crate::slot::{SensorSlot, SENSOR_COUNT};

/// A row/column position on the LCD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldPosition {
    pub row: u8,
    pub col: u8,
}

impl FieldPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Where a slot draws its distance, and its pair's bearing if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotLayout {
    /// Distance field anchor
    pub distance: FieldPosition,
    /// Settle after moving to the distance anchor (ms)
    pub distance_settle_ms: u32,
    /// Bearing field, drawn before the distance by the second slot of a pair
    pub angle: Option<FieldPosition>,
}

/// Layout of every slot, indexed by slot
pub const SLOT_LAYOUTS: [SlotLayout; SENSOR_COUNT] = [
    SlotLayout {
        distance: FieldPosition::new(0, 1),
        distance_settle_ms: 40,
        angle: None,
    },
    SlotLayout {
        distance: FieldPosition::new(0, 8),
        distance_settle_ms: 40,
        angle: Some(FieldPosition::new(0, 14)),
    },
    SlotLayout {
        distance: FieldPosition::new(1, 1),
        distance_settle_ms: 30,
        angle: None,
    },
    SlotLayout {
        distance: FieldPosition::new(1, 8),
        distance_settle_ms: 30,
        angle: Some(FieldPosition::new(1, 14)),
    },
];

impl SlotLayout {
    /// Layout for one slot
    pub const fn of(slot: SensorSlot) -> &'static SlotLayout {
        &SLOT_LAYOUTS[slot.index()]
    }
}

/// Static legend, one entry per row
pub const LEGEND: [&[u8]; 2] = [b"A  cm  B  cm  ", b"C  cm  D  cm  "];

/// Written over the distance field in the alert band
pub const ALERT_TEXT: &[u8] = b"Alert";

/// Restores the unit label after the alert text
pub const ALERT_TRAILER: &[u8] = b"  cm ";

/// Written for a missing or out-of-band distance
pub const OUT_OF_RANGE_MARKER: &[u8] = b" -- ";

/// Cursor-left steps between the alert text and its trailer
pub const ALERT_SHIFT_STEPS: usize = 5;
