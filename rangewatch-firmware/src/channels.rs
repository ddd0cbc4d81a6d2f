//! Inter-task communication
//!
//! The ranging task publishes a summary after every pass; the main task
//! picks up the latest one on its heartbeat. Older summaries are
//! overwritten, never queued.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use rangewatch_core::PassReport;

/// Latest pass summary (updated by the ranging task)
pub static PASS_REPORT: Signal<CriticalSectionRawMutex, PassReport> = Signal::new();
