//! Tivabench Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific code (the TM4C123 firmware crate) or by test doubles.
//! The interesting seam is the two-wire bus: the transaction engine in
//! `tivabench-core` drives the raw [`bus::BusRegisters`] surface, and every
//! device driver consumes the byte-oriented [`bus::RegisterBus`] primitives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Drivers (tivabench-drivers)             │
//! └──────────────────────────────────────────┘
//!                     │ RegisterBus
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  Bus master engine (tivabench-core)      │
//! └──────────────────────────────────────────┘
//!                     │ BusRegisters
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ TM4C123 MMIO  │       │ simulated bus │
//! │  (firmware)   │       │    (tests)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusRegisters`], [`bus::RegisterBus`] - Two-wire bus seams
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmChannel`] - PWM compare output
//! - [`delay::DelayMs`] - Millisecond busy delay

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod delay;
pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use bus::{BusRegisters, RegisterBus};
pub use delay::DelayMs;
pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmChannel;
