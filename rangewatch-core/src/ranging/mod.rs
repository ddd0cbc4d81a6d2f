//! Ultrasonic ranging
//!
//! One measurement per slot: pulse the trigger line, time the echo pulse
//! with the tick counter, and convert the pulse width to centimeters.
//! Both echo waits are bounded so a dead or stuck sensor cannot stall the
//! acquisition pass.

pub mod conversion;
pub mod engine;

pub use conversion::{ticks_to_cm, DistanceSample, EchoOutcome, TimeoutPhase};
pub use engine::RangingEngine;
