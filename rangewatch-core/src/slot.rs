//! Sensor slots and pairs
//!
//! The board carries four ultrasonic sensors, addressed by slot 0-3 and
//! labelled A-D on the display. Slots (0, 1) and (2, 3) form the two pairs
//! whose distance difference gives a bearing.

/// Number of ultrasonic sensors
pub const SENSOR_COUNT: usize = 4;

/// Number of sensor pairs used for bearing estimation
pub const PAIR_COUNT: usize = SENSOR_COUNT / 2;

/// One of the four sensors and its trigger/echo line pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSlot(u8);

impl SensorSlot {
    /// All slots in acquisition order
    pub const ALL: [SensorSlot; SENSOR_COUNT] =
        [SensorSlot(0), SensorSlot(1), SensorSlot(2), SensorSlot(3)];

    /// Slot for an index, if in range
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < SENSOR_COUNT {
            Some(SensorSlot(index))
        } else {
            None
        }
    }

    /// Zero-based index, for array access
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Display label ('A'..'D')
    pub const fn label(self) -> char {
        (b'A' + self.0) as char
    }

    /// The pair this slot belongs to
    pub const fn pair(self) -> SensorPair {
        SensorPair(self.0 / 2)
    }

    /// The pair whose samples are both fresh once this slot is acquired
    ///
    /// Only the second slot of a pair completes it.
    pub const fn completes_pair(self) -> Option<SensorPair> {
        if self.0 % 2 == 1 {
            Some(self.pair())
        } else {
            None
        }
    }
}

/// A pair of adjacent sensors used for bearing estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPair(u8);

impl SensorPair {
    /// Both pairs, in acquisition order
    pub const ALL: [SensorPair; PAIR_COUNT] = [SensorPair(0), SensorPair(1)];

    /// Zero-based pair index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// First slot of the pair
    pub const fn first(self) -> SensorSlot {
        SensorSlot(self.0 * 2)
    }

    /// Second slot of the pair
    pub const fn second(self) -> SensorSlot {
        SensorSlot(self.0 * 2 + 1)
    }
}
