//! PWM output abstractions
//!
//! A single compare channel on a fixed-period PWM generator, enough for
//! hobby-servo pulse generation.

/// One PWM compare channel
///
/// The generator period is fixed at initialization; only the pulse width
/// changes at runtime.
pub trait PwmChannel {
    /// Counter ticks in one full PWM period.
    fn period_ticks(&self) -> u32;

    /// Set the high-pulse width in counter ticks.
    ///
    /// Values above the period are clamped by the implementation.
    fn set_pulse_ticks(&mut self, ticks: u32);
}
