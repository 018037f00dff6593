//! Device driver implementations
//!
//! This crate provides drivers for the peripherals on the bench rig. Every
//! driver is a client of the byte-oriented bus primitives
//! ([`tivabench_hal::RegisterBus`]) and never touches bus registers
//! directly; protocol sequencing lives in `tivabench-core`.
//!
//! - MPU6050 6-axis IMU (raw samples, physical units, tilt angles)
//! - TCS34727 RGB color sensor (raw channels, normalized RGB, classification)
//! - HD44780 character LCD behind a PCF8574 I/O expander
//! - Hobby servo on a PWM compare channel
//! - RGB status LED

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod display;
pub mod imu;
pub mod indicator;
pub mod servo;

#[cfg(test)]
pub(crate) mod testsupport;
