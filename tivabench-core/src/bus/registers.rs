//! Bit layout of the master control/status and address registers
//!
//! The control register is write-only command bits; reading the same
//! offset yields the status bits. The address register carries the 7-bit
//! device address in bits 7:1 and the direction in bit 0.

/// Command bits (control register, write side)
pub mod cmd {
    /// Enable the master to run the current phase
    pub const RUN: u8 = 0x01;
    /// Generate a (repeated) START before the phase
    pub const START: u8 = 0x02;
    /// Generate a STOP after the phase
    pub const STOP: u8 = 0x04;
    /// Acknowledge the received byte (continue a burst receive)
    pub const ACK: u8 = 0x08;
}

/// Status bits (control register, read side)
pub mod status {
    /// Controller is processing a command
    pub const BUSY: u8 = 0x01;
    /// Last phase ended in error (no acknowledgment)
    pub const ERROR: u8 = 0x02;
    /// Address byte was not acknowledged
    pub const ADRACK: u8 = 0x04;
    /// Data byte was not acknowledged
    pub const DATACK: u8 = 0x08;
    /// Bus arbitration was lost to another master
    pub const ARBLST: u8 = 0x10;
    /// Some other party holds the bus
    pub const BUSBSY: u8 = 0x40;
}

/// Transfer direction carried in bit 0 of the address register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Transmit,
    Receive,
}

/// Pack a 7-bit device address and direction into the address register value.
pub const fn address_byte(addr: u8, dir: Dir) -> u8 {
    let rs = match dir {
        Dir::Transmit => 0,
        Dir::Receive => 1,
    };
    (addr << 1) | rs
}
