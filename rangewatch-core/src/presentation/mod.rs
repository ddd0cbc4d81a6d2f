//! Presentation state machine
//!
//! Decides what each slot's turn looks like on the LCD and on the alarm
//! outputs. Planning is pure: [`Presenter`] turns a distance (and, for the
//! second slot of a pair, a bearing) into a list of [`Action`]s, and
//! [`execute`] plays that list against the display, the alarm and a delay.

pub mod band;
pub mod layout;
pub mod plan;
pub mod render;

pub use band::{in_chirp_band, DistanceBand};
pub use layout::{FieldPosition, SlotLayout, LEGEND, SLOT_LAYOUTS};
pub use plan::{plan_number, Action, Presenter, SlotPlan};
pub use render::execute;
