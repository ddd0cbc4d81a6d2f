//! Collaborator traits
//!
//! These traits define the interface between the ranging/presentation
//! logic and the hardware-specific drivers.

pub mod alarm;
pub mod display;
pub mod sensor;

pub use alarm::{AlarmLine, AlarmOutput};
pub use display::{CharacterDisplay, CharacterDisplayExt};
pub use sensor::SensorBank;
