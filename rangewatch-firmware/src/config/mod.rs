//! Board configuration
//!
//! `BOARD` is generated by build.rs from board.toml, which it has already
//! validated; edit board.toml and rebuild to change pins or calibration.

use rangewatch_core::config::{
    AlarmPins, BoardConfig, LcdConfig, PinConfig, PresentationTiming, RangingCalibration,
    SensorPins,
};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
