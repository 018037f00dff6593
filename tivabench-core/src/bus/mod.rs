//! Two-wire bus master transaction engine
//!
//! Turns logical "read register R from device D" / "write register R on
//! device D" requests into the sequenced bus protocol: start condition,
//! addressing, acknowledgment checking, repeated start, stop condition.
//! Device drivers are clients of this engine through the
//! [`RegisterBus`](tivabench_hal::RegisterBus) primitives and contribute no
//! protocol logic of their own.

pub mod engine;
pub mod registers;
pub mod timing;

#[cfg(test)]
pub(crate) mod sim;

pub use engine::{BusError, BusMaster};
pub use timing::{clock_period, STANDARD_HZ};
