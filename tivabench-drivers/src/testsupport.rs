//! Shared test doubles for driver tests
//!
//! A register-map mock of the bus primitives: one simulated device with a
//! 256-byte register file, auto-incrementing bursts, and a record of every
//! write so tests can assert on the exact sequence a driver issues.

use std::vec::Vec;

use tivabench_hal::{DelayMs, RegisterBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

pub struct MockBus {
    pub device: u8,
    pub regs: [u8; 256],
    /// Single-register writes, in order: (reg, value)
    pub writes: Vec<(u8, u8)>,
    /// Burst writes, in order: (start reg, payload)
    pub bursts: Vec<(u8, Vec<u8>)>,
    /// Fail every operation, as an absent device would
    pub fail: bool,
}

impl MockBus {
    pub fn new(device: u8) -> Self {
        Self {
            device,
            regs: [0; 256],
            writes: Vec::new(),
            bursts: Vec::new(),
            fail: false,
        }
    }

    fn check(&self, addr: u8) -> Result<(), MockBusError> {
        if self.fail || addr != self.device {
            Err(MockBusError)
        } else {
            Ok(())
        }
    }
}

impl RegisterBus for MockBus {
    type Error = MockBusError;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), MockBusError> {
        self.check(addr)?;
        self.regs[reg as usize] = value;
        self.writes.push((reg, value));
        Ok(())
    }

    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, MockBusError> {
        self.check(addr)?;
        Ok(self.regs[reg as usize])
    }

    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), MockBusError> {
        self.check(addr)?;
        for (i, byte) in data.iter().enumerate() {
            self.regs[reg.wrapping_add(i as u8) as usize] = *byte;
        }
        self.bursts.push((reg, data.to_vec()));
        Ok(())
    }

    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), MockBusError> {
        self.check(addr)?;
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.regs[reg.wrapping_add(i as u8) as usize];
        }
        Ok(())
    }
}

/// Delay spy: counts milliseconds instead of sleeping.
#[derive(Default)]
pub struct TestDelay {
    pub total_ms: u32,
}

impl DelayMs for TestDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}
