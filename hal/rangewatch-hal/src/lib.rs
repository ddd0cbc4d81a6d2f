//! Rangewatch Hardware Abstraction Layer
//!
//! This crate defines the low-level I/O traits the ranging firmware needs
//! from a chip: digital pins and a tick counter for echo timing. Chip
//! crates (currently RP2040) implement them so the board-agnostic core and
//! drivers never touch registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rangewatch-firmware                    │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │ rangewatch-core  │◄──│ rangewatch-      │
//! │ rangewatch-hal   │   │   drivers        │
//! └──────────────────┘   └──────────────────┘
//!          ▲
//!          │
//! ┌──────────────────┐
//! │ rangewatch-hal-  │
//! │     rp2040       │
//! └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`timer::TickCounter`] - Start/stop counter used to time echo pulses

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use timer::TickCounter;
