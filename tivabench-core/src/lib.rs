//! Board-agnostic core logic for the tivabench firmware
//!
//! This crate contains the logic that does not depend on specific
//! hardware implementations:
//!
//! - The two-wire bus master transaction engine
//! - Bus clock-divisor computation
//! - Demo mode selection

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod demo;

pub use bus::{BusError, BusMaster};
pub use demo::DemoMode;
