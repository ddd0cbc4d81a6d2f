//! Tick counter abstraction
//!
//! Models a 16-bit hardware timer that can be cleared, gated on and off,
//! and read back as two bytes (the classic TMRxH/TMRxL register pair).
//! The ranging engine gates the counter on the echo pulse and reads the
//! accumulated count once the pulse ends.

/// Start/stop counter used to time echo pulses
///
/// Tick rate is implementation-defined; the ranging calibration converts
/// ticks to centimeters, so it has to match the rate of the counter used.
pub trait TickCounter {
    /// Clear the accumulated count
    fn reset(&mut self);

    /// Start counting
    fn start(&mut self);

    /// Stop counting; the accumulated count is kept
    fn stop(&mut self);

    /// High byte of the accumulated count
    fn read_high(&mut self) -> u8;

    /// Low byte of the accumulated count
    fn read_low(&mut self) -> u8;

    /// Full 16-bit accumulated count
    ///
    /// Reads the low byte first, like the PIC/AVR latching convention.
    fn ticks(&mut self) -> u16 {
        let low = self.read_low();
        let high = self.read_high();
        u16::from_be_bytes([high, low])
    }
}
