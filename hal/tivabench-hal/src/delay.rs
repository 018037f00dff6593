//! Millisecond delay abstraction
//!
//! Device drivers own their settling delays (the bus engine imposes none
//! beyond its busy polls), so they take a delay provider by trait.

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Any embedded-hal delay provider works as a [`DelayMs`].
#[cfg(feature = "embedded-hal")]
impl<T: embedded_hal::delay::DelayNs> DelayMs for T {
    fn delay_ms(&mut self, ms: u32) {
        embedded_hal::delay::DelayNs::delay_ms(self, ms);
    }
}
