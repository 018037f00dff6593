//! Simulated bus peripheral for engine tests
//!
//! Models one slave device with a 256-byte register file and the usual
//! register auto-increment, behind the same four-register surface the real
//! peripheral exposes. Transfers complete instantly (the busy bits never
//! read set), every control-register write is logged so tests can assert
//! on the exact command sequence, and faults can be injected to exercise
//! the NACK paths.

use std::vec::Vec;

use tivabench_hal::BusRegisters;

use super::registers::{cmd, status};

/// Injectable fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The device NACKs its own address (or the register-select byte).
    AddressNack,
    /// The device NACKs the n-th payload byte (0-based, counted over the
    /// simulator's lifetime; register-select bytes do not count).
    DataNackAt(usize),
    /// Another master wins arbitration at the n-th payload byte.
    ArbitrationLostAt(usize),
}

pub struct SimBus {
    device_addr: u8,
    /// Device register file, auto-incrementing pointer semantics.
    pub regs: [u8; 256],
    /// Every value written to the control register, in order.
    pub control_log: Vec<u8>,
    /// STOP conditions seen on the wire.
    pub stop_count: usize,
    /// Last programmed clock divisor.
    pub divisor: Option<u8>,

    msa: u8,
    mdr: u8,
    status: u8,
    ptr: usize,
    open: bool,
    payload_count: usize,
    fault: Option<Fault>,
}

impl SimBus {
    pub fn new(device_addr: u8) -> Self {
        Self {
            device_addr,
            regs: [0; 256],
            control_log: Vec::new(),
            stop_count: 0,
            divisor: None,
            msa: 0,
            mdr: 0,
            status: 0,
            ptr: 0,
            open: false,
            payload_count: 0,
            fault: None,
        }
    }

    pub fn inject(&mut self, fault: Fault) {
        self.fault = Some(fault);
    }

    /// Payload bytes actually transferred (register-select bytes excluded).
    pub fn data_bytes_transferred(&self) -> usize {
        self.payload_count
    }

    /// Status raised by the injected fault on the current payload byte.
    fn fault_status(&self) -> Option<u8> {
        match self.fault {
            Some(Fault::DataNackAt(i)) if i == self.payload_count => {
                Some(status::ERROR | status::DATACK)
            }
            Some(Fault::ArbitrationLostAt(i)) if i == self.payload_count => {
                Some(status::ERROR | status::ARBLST)
            }
            _ => None,
        }
    }

    fn transmit_byte(&mut self) {
        if let Some(s) = self.fault_status() {
            self.status = s;
            return;
        }
        self.regs[self.ptr] = self.mdr;
        self.ptr = (self.ptr + 1) & 0xFF;
        self.payload_count += 1;
    }

    fn receive_byte(&mut self) {
        // The byte is on the wire before the acknowledgment bit, so it is
        // delivered even when this transfer ends in a NACK.
        self.mdr = self.regs[self.ptr];
        self.ptr = (self.ptr + 1) & 0xFF;
        if let Some(s) = self.fault_status() {
            self.status = s;
        }
        self.payload_count += 1;
    }
}

impl BusRegisters for SimBus {
    fn set_slave_address(&mut self, addr: u8) {
        self.msa = addr;
    }

    fn write_data(&mut self, byte: u8) {
        self.mdr = byte;
    }

    fn read_data(&self) -> u8 {
        self.mdr
    }

    fn write_control(&mut self, c: u8) {
        self.control_log.push(c);
        self.status = 0;

        if c & cmd::START != 0 {
            self.open = true;
            let addressed = (self.msa >> 1) == self.device_addr
                && !matches!(self.fault, Some(Fault::AddressNack));
            if !addressed {
                self.status = status::ERROR | status::ADRACK;
            } else if self.msa & 1 == 0 {
                // Transmit direction: the data register holds the
                // register-select byte.
                self.ptr = self.mdr as usize;
            } else if c & cmd::RUN != 0 {
                self.receive_byte();
            }
        } else if c & cmd::RUN != 0 && self.open {
            if self.msa & 1 == 0 {
                self.transmit_byte();
            } else {
                self.receive_byte();
            }
        }

        if c & cmd::STOP != 0 {
            self.open = false;
            self.stop_count += 1;
        }
    }

    fn read_status(&self) -> u8 {
        // Transfers complete instantly: BUSY and BUSBSY never read set.
        self.status
    }

    fn set_clock_period(&mut self, divisor: u8) {
        self.divisor = Some(divisor);
    }
}
