//! Character screen model for the Rangewatch LCD
//!
//! This crate provides:
//! - [`CharacterScreen`], a model of the HD44780 display data RAM that
//!   interprets the same command and data bytes the real controller gets
//! - [`Mirrored`], a [`CharacterDisplay`] wrapper that forwards to the real
//!   LCD and keeps a `CharacterScreen` shadow of it
//!
//! # Architecture
//!
//! The LCD bus is write-only, so the firmware cannot read back what is on
//! the glass. The shadow gives it (and host tests) a view of the visible
//! rows that is exactly as good as the command stream:
//!
//! ```text
//! Rangefinder ──► Mirrored ──► Hd44780 ──► LCD
//!                    │
//!                    └──► CharacterScreen (shadow, logged each pass)
//! ```
//!
//! [`CharacterDisplay`]: rangewatch_core::traits::CharacterDisplay

#![cfg_attr(not(test), no_std)]

pub mod mirror;
pub mod screen;

// Re-export key types
pub use mirror::Mirrored;
pub use screen::{CharacterScreen, DDRAM_COLS, SCREEN_COLS, SCREEN_ROWS};
