//! Ultrasonic sensor line drivers

pub mod bank;

pub use bank::PinSensorBank;
