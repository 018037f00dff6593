//! The bus master transaction engine
//!
//! One [`BusMaster`] wraps the one physical register block for the process
//! lifetime. It holds no transaction state between calls — the hardware
//! control/status register is the state — and provides no internal locking:
//! `&mut self` on every primitive makes one-at-a-time use a compile-time
//! property in the single-context polling model this engine is built for.
//!
//! Once a START has been issued, every path drives the transaction through
//! to a STOP (the intended one or an error-triggered one) before returning.

use tivabench_hal::{BusRegisters, RegisterBus};

use super::registers::{address_byte, cmd, status, Dir};
use super::timing::clock_period;

/// Iterations of the status poll before a transfer is declared hung.
///
/// The hardware reports completion within a few bus-clock periods, so a
/// healthy bus never comes near this. A miswired or held bus does, and gets
/// [`BusError::Timeout`] instead of hanging the caller forever.
const POLL_BUDGET: u32 = 1 << 20;

/// Transaction failure reported to device drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge, or bus arbitration was lost. The two are
    /// indistinguishable to callers and safe to retry from the addressing
    /// phase.
    NoAck,
    /// The busy poll budget was exhausted; bus or device is hung.
    Timeout,
}

/// Two-wire bus master over a raw register block
pub struct BusMaster<R: BusRegisters> {
    regs: R,
}

impl<R: BusRegisters> BusMaster<R> {
    /// Wrap a register block. The block must already be clocked and pinned
    /// out by the one-time platform bring-up.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Program the clock divisor for a target bus frequency.
    ///
    /// Idempotent; see [`clock_period`] for the rounding contract.
    pub fn set_clock(&mut self, system_hz: u32, bus_hz: u32) {
        self.regs.set_clock_period(clock_period(system_hz, bus_hz));
    }

    /// Release the underlying register block.
    pub fn release(self) -> R {
        self.regs
    }

    /// Entry guard: wait for any previous transaction to leave the bus.
    fn wait_bus_free(&mut self) -> Result<(), BusError> {
        for _ in 0..POLL_BUDGET {
            if self.regs.read_status() & status::BUSBSY == 0 {
                return Ok(());
            }
        }
        Err(BusError::Timeout)
    }

    /// Wait for the controller to finish the command in flight.
    fn wait_ready(&mut self) -> Result<(), BusError> {
        for _ in 0..POLL_BUDGET {
            if self.regs.read_status() & status::BUSY == 0 {
                return Ok(());
            }
        }
        Err(BusError::Timeout)
    }

    /// Check the error/arbitration flags after a completed command.
    fn check(&mut self) -> Result<(), BusError> {
        if self.regs.read_status() & (status::ERROR | status::ARBLST) != 0 {
            Err(BusError::NoAck)
        } else {
            Ok(())
        }
    }

    /// Error check for the terminal byte of a burst receive. The data NACK
    /// there is the master's own end-of-burst signal and is tolerated; an
    /// unacknowledged address or a lost arbitration is still a failure.
    fn check_terminal(&mut self) -> Result<(), BusError> {
        if self.regs.read_status() & (status::ADRACK | status::ARBLST) != 0 {
            Err(BusError::NoAck)
        } else {
            Ok(())
        }
    }

    /// Error check for phases that have not issued their STOP yet: on
    /// failure, release the bus before surfacing the error.
    fn check_or_stop(&mut self) -> Result<(), BusError> {
        match self.check() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.regs.write_control(cmd::STOP);
                self.wait_ready()?;
                Err(e)
            }
        }
    }

    /// Addressing phase: claim the bus, send the device address in transmit
    /// direction and the register-select byte under START+RUN.
    ///
    /// An error here means the device did not acknowledge its own address
    /// or the register-select byte.
    fn address_phase(&mut self, addr: u8, reg: u8) -> Result<(), BusError> {
        self.wait_bus_free()?;
        self.regs.set_slave_address(address_byte(addr, Dir::Transmit));
        self.regs.write_data(reg);
        self.regs.write_control(cmd::START | cmd::RUN);
        self.wait_ready()?;
        self.check_or_stop()
    }

    /// Write a single byte to a device register.
    pub fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), BusError> {
        self.address_phase(addr, reg)?;
        self.regs.write_data(value);
        self.regs.write_control(cmd::STOP | cmd::RUN);
        self.wait_ready()?;
        self.check()
    }

    /// Read a single byte from a device register.
    ///
    /// The repeated START switches direction without releasing the bus;
    /// START+STOP+RUN is a complete one-byte receive.
    pub fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, BusError> {
        self.address_phase(addr, reg)?;
        self.regs.set_slave_address(address_byte(addr, Dir::Receive));
        self.regs.write_control(cmd::START | cmd::STOP | cmd::RUN);
        self.wait_ready()?;
        self.check()?;
        Ok(self.regs.read_data())
    }

    /// Write a block of bytes starting at `reg`, relying on the device's
    /// register auto-increment.
    ///
    /// An empty block returns success without any bus activity.
    pub fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), BusError> {
        let (last, body) = match data.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };

        self.address_phase(addr, reg)?;

        for byte in body {
            self.regs.write_data(*byte);
            self.regs.write_control(cmd::RUN);
            self.wait_ready()?;
            self.check_or_stop()?;
        }

        self.regs.write_data(*last);
        self.regs.write_control(cmd::STOP | cmd::RUN);
        self.wait_ready()?;
        self.check()
    }

    /// Read `buf.len()` bytes starting at `reg`.
    ///
    /// A data NACK on the terminal byte is the receiver-side "no more
    /// bytes" signal, not an error. An address NACK or arbitration loss on
    /// the terminal phase still fails; any error before the terminal byte
    /// aborts with a STOP. On any `Err` the buffer contents are poisoned.
    pub fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let n = buf.len();
        if n == 0 {
            return Ok(());
        }

        self.address_phase(addr, reg)?;
        self.regs.set_slave_address(address_byte(addr, Dir::Receive));

        if n == 1 {
            self.regs.write_control(cmd::START | cmd::STOP | cmd::RUN);
            self.wait_ready()?;
            self.check_terminal()?;
            buf[0] = self.regs.read_data();
            return Ok(());
        }

        self.regs.write_control(cmd::START | cmd::RUN | cmd::ACK);
        self.wait_ready()?;
        self.check_or_stop()?;
        buf[0] = self.regs.read_data();

        for slot in &mut buf[1..n - 1] {
            self.regs.write_control(cmd::RUN | cmd::ACK);
            self.wait_ready()?;
            self.check_or_stop()?;
            *slot = self.regs.read_data();
        }

        self.regs.write_control(cmd::STOP | cmd::RUN);
        self.wait_ready()?;
        self.check_terminal()?;
        buf[n - 1] = self.regs.read_data();
        Ok(())
    }
}

impl<R: BusRegisters> RegisterBus for BusMaster<R> {
    type Error = BusError;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), BusError> {
        BusMaster::write_reg(self, addr, reg, value)
    }

    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, BusError> {
        BusMaster::read_reg(self, addr, reg)
    }

    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), BusError> {
        BusMaster::write_regs(self, addr, reg, data)
    }

    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        BusMaster::read_regs(self, addr, reg, buf)
    }
}
