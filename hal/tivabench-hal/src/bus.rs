//! Two-wire bus abstractions
//!
//! Two seams are defined here. [`BusRegisters`] is the raw four-register
//! surface of the single-master two-wire peripheral; the transaction engine
//! is the only consumer. [`RegisterBus`] is the byte-oriented primitive API
//! that device drivers call; they never touch bus registers directly.

/// Raw register surface of the two-wire master peripheral
///
/// The hardware control/status register *is* the transaction state; an
/// implementation holds no state of its own beyond the register block.
/// Implemented over MMIO on the target and by a simulated bus in tests.
pub trait BusRegisters {
    /// Program the slave-address register: 7-bit address in bits 7:1,
    /// direction in bit 0 (1 = receive).
    fn set_slave_address(&mut self, addr: u8);

    /// Write one byte to the data register.
    fn write_data(&mut self, byte: u8);

    /// Read one byte from the data register.
    fn read_data(&self) -> u8;

    /// Issue a command through the control register (RUN/START/STOP/ACK bits).
    fn write_control(&mut self, cmd: u8);

    /// Read the status register (BUSY/ERROR/ADRACK/DATACK/ARBLST bits).
    fn read_status(&self) -> u8;

    /// Program the clock-divisor register.
    fn set_clock_period(&mut self, divisor: u8);
}

/// Byte-oriented bus primitives consumed by every device driver
///
/// A device register here is the 8-bit register address inside the slave
/// device, selected on the wire before the payload bytes. Burst variants
/// rely on the device's internal register auto-increment.
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write a single byte to a device register.
    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Read a single byte from a device register.
    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, Self::Error>;

    /// Write a block of bytes starting at `reg`.
    ///
    /// An empty block is a no-op success; no bus activity is issued.
    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes starting at `reg`.
    ///
    /// On an error result the buffer contents are unreliable and must be
    /// discarded by the caller.
    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Lets several drivers share one bus by reborrowing it.
impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        T::write_reg(self, addr, reg, value)
    }

    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, Self::Error> {
        T::read_reg(self, addr, reg)
    }

    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write_regs(self, addr, reg, data)
    }

    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read_regs(self, addr, reg, buf)
    }
}
