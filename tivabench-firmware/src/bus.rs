//! MMIO implementation of the bus register surface over the I2C0 block
//!
//! The control and status registers share one offset: writes issue
//! commands, reads report status. Everything above this file is
//! hardware-agnostic; the transaction engine drives these six accessors.

use tivabench_hal::BusRegisters;
use tm4c123x::I2C0;

/// Master-function enable bit in MCR
const MCR_MFE: u32 = 0x10;

/// The I2C0 register block as seen by the transaction engine.
///
/// Owns the peripheral; pin muxing and clock gating happen in board
/// bring-up before this is constructed.
pub struct I2cBlock {
    i2c: I2C0,
}

impl I2cBlock {
    /// Take the peripheral and enable its master function.
    pub fn new(i2c: I2C0) -> Self {
        i2c.mcr.write(|w| unsafe { w.bits(MCR_MFE) });
        Self { i2c }
    }
}

impl BusRegisters for I2cBlock {
    fn set_slave_address(&mut self, addr: u8) {
        self.i2c.msa.write(|w| unsafe { w.bits(addr as u32) });
    }

    fn write_data(&mut self, byte: u8) {
        self.i2c.mdr.write(|w| unsafe { w.bits(byte as u32) });
    }

    fn read_data(&self) -> u8 {
        self.i2c.mdr.read().bits() as u8
    }

    fn write_control(&mut self, cmd: u8) {
        self.i2c.mcs.write(|w| unsafe { w.bits(cmd as u32) });
    }

    fn read_status(&self) -> u8 {
        self.i2c.mcs.read().bits() as u8
    }

    fn set_clock_period(&mut self, divisor: u8) {
        self.i2c.mtpr.write(|w| unsafe { w.bits(divisor as u32) });
    }
}
