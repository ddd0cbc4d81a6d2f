//! Embassy async tasks

pub mod ranging;

pub use ranging::{ranging_task, BoardRangefinder};
