//! HD44780 character LCD behind a PCF8574 port expander
//!
//! The expander's eight outputs map to D7..D4, backlight, enable, R/W and
//! RS, so every controller byte goes out as two nibbles and each nibble as
//! an enable-high/enable-low pair. One controller byte is therefore a
//! four-byte burst to the expander's output latch.

use tivabench_hal::{DelayMs, RegisterBus};

/// Common backpack address (A2..A0 unstrapped)
pub const ADDR: u8 = 0x3F;

/// The expander has a single output latch
const OUTPUT: u8 = 0x00;

/// Register-select: 1 = data, 0 = command
const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_LEFT_TO_RIGHT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    /// DDRAM addresses for the start of each row
    pub const ROW_BASE: [u8; 2] = [0x80, 0xC0];
}

pub const COLS: u8 = 16;
pub const ROWS: u8 = 2;

/// HD44780 over the bus primitives
pub struct Lcd<B> {
    bus: B,
    backlight: bool,
}

impl<B: RegisterBus> Lcd<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            backlight: true,
        }
    }

    pub fn release(self) -> B {
        self.bus
    }

    /// Power-on reset into 4-bit mode, then display on with the cursor
    /// hidden and a cleared screen. The three 0x3 nibbles are the
    /// controller's documented wake-from-8-bit dance.
    pub fn init<D: DelayMs>(&mut self, delay: &mut D) -> Result<(), B::Error> {
        delay.delay_ms(50);
        self.write_nibble(0x30, 0)?;
        delay.delay_ms(5);
        self.write_nibble(0x30, 0)?;
        delay.delay_ms(1);
        self.write_nibble(0x30, 0)?;
        delay.delay_ms(1);
        self.write_nibble(0x20, 0)?;
        delay.delay_ms(1);

        self.command(cmd::FUNCTION_4BIT_2LINE)?;
        delay.delay_ms(1);
        self.command(cmd::DISPLAY_ON)?;
        delay.delay_ms(1);
        self.command(cmd::ENTRY_LEFT_TO_RIGHT)?;
        delay.delay_ms(1);
        self.clear(delay)?;
        Ok(())
    }

    pub fn clear<D: DelayMs>(&mut self, delay: &mut D) -> Result<(), B::Error> {
        self.command(cmd::CLEAR)?;
        delay.delay_ms(2);
        Ok(())
    }

    pub fn home<D: DelayMs>(&mut self, delay: &mut D) -> Result<(), B::Error> {
        self.command(cmd::HOME)?;
        delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor. Out-of-range coordinates clamp to the panel.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), B::Error> {
        let row = row.min(ROWS - 1);
        let col = col.min(COLS - 1);
        self.command(cmd::ROW_BASE[row as usize] + col)
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), B::Error> {
        self.backlight = on;
        // Latch the bare backlight bit without touching the controller.
        let latch = if on { BACKLIGHT } else { 0 };
        self.bus.write_regs(ADDR, OUTPUT, &[latch])
    }

    pub fn write_char(&mut self, c: char) -> Result<(), B::Error> {
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        self.write_byte(byte, RS)
    }

    /// Write a string at the current cursor position. No wrapping; the
    /// controller runs off the visible columns on its own.
    pub fn write_str(&mut self, s: &str) -> Result<(), B::Error> {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    fn command(&mut self, byte: u8) -> Result<(), B::Error> {
        self.write_byte(byte, 0)
    }

    fn write_byte(&mut self, byte: u8, rs: u8) -> Result<(), B::Error> {
        let base = rs | self.backlight_bit();
        let hi = (byte & 0xF0) | base;
        let lo = (byte << 4) | base;
        self.bus
            .write_regs(ADDR, OUTPUT, &[hi | ENABLE, hi, lo | ENABLE, lo])
    }

    fn write_nibble(&mut self, byte: u8, rs: u8) -> Result<(), B::Error> {
        let hi = (byte & 0xF0) | rs | self.backlight_bit();
        self.bus.write_regs(ADDR, OUTPUT, &[hi | ENABLE, hi])
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            BACKLIGHT
        } else {
            0
        }
    }
}
