//! TCS34727 RGBC color sensor
//!
//! Every register access goes through the command register, so the
//! register address is OR'd with the command bit (and the auto-increment
//! mode for the multi-byte channel read). Channel data is little-endian,
//! clear/red/green/blue in that order starting at CDATAL.

use tivabench_hal::{DelayMs, RegisterBus};

/// Fixed device address
pub const ADDR: u8 = 0x29;

/// Command bit, repeated-byte protocol
const CMD: u8 = 0x80;
/// Command bit with register auto-increment
const CMD_AUTO_INC: u8 = 0xA0;

mod reg {
    pub const ENABLE: u8 = 0x00;
    pub const ATIME: u8 = 0x01;
    pub const CONTROL: u8 = 0x0F;
    pub const ID: u8 = 0x12;
    pub const CDATAL: u8 = 0x14;
}

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;
/// Shortest integration cycle, 2.4 ms
const ATIME_2_4MS: u8 = 0xFF;
/// 1x analog gain
const GAIN_1X: u8 = 0x00;

/// Identity byte for the -27 package variant
const DEVICE_ID: u8 = 0x4D;

/// Oscillator/ADC settle time after enabling, in ms
const SETTLE_MS: u32 = 3;

/// TCS34727 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tcs34727Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// ID register did not read back 0x4D
    UnknownDevice(u8),
}

impl<E> From<E> for Tcs34727Error<E> {
    fn from(e: E) -> Self {
        Tcs34727Error::Bus(e)
    }
}

/// One 16-bit-per-channel RGBC sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawColor {
    pub clear: u16,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// Dominant color classification of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectedColor {
    Red,
    Green,
    Blue,
    /// No channel dominates, or the clear channel is too dark to judge
    None,
}

/// Minimum clear-channel count before a classification is attempted
const CLEAR_FLOOR: u16 = 10;

/// TCS34727 over the bus primitives
pub struct Tcs34727<B> {
    bus: B,
}

impl<B: RegisterBus> Tcs34727<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }

    /// Identity-check and power the sensor up: shortest integration time,
    /// 1x gain, oscillator on, then ADC enabled after the settle delay.
    pub fn init<D: DelayMs>(&mut self, delay: &mut D) -> Result<(), Tcs34727Error<B::Error>> {
        let id = self.bus.read_reg(ADDR, CMD | reg::ID)?;
        if id != DEVICE_ID {
            return Err(Tcs34727Error::UnknownDevice(id));
        }

        self.bus.write_reg(ADDR, CMD | reg::ATIME, ATIME_2_4MS)?;
        self.bus.write_reg(ADDR, CMD | reg::CONTROL, GAIN_1X)?;
        self.bus.write_reg(ADDR, CMD | reg::ENABLE, ENABLE_PON)?;
        delay.delay_ms(SETTLE_MS);
        self.bus
            .write_reg(ADDR, CMD | reg::ENABLE, ENABLE_PON | ENABLE_AEN)?;
        delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// Latest RGBC sample, one eight-byte auto-increment burst.
    pub fn raw(&mut self) -> Result<RawColor, Tcs34727Error<B::Error>> {
        let mut data = [0u8; 8];
        self.bus.read_regs(ADDR, CMD_AUTO_INC | reg::CDATAL, &mut data)?;
        Ok(RawColor {
            clear: u16::from_le_bytes([data[0], data[1]]),
            red: u16::from_le_bytes([data[2], data[3]]),
            green: u16::from_le_bytes([data[4], data[5]]),
            blue: u16::from_le_bytes([data[6], data[7]]),
        })
    }

    /// RGB channels normalized against the clear channel, 0..=255 each.
    /// A dark scene (clear below the floor) normalizes to black.
    pub fn rgb(&mut self) -> Result<(u8, u8, u8), Tcs34727Error<B::Error>> {
        let raw = self.raw()?;
        if raw.clear < CLEAR_FLOOR {
            return Ok((0, 0, 0));
        }
        let clear = raw.clear as u32;
        let scale = |ch: u16| ((ch as u32 * 255 / clear).min(255)) as u8;
        Ok((scale(raw.red), scale(raw.green), scale(raw.blue)))
    }

    /// Classify the dominant channel of the latest sample.
    pub fn detect(&mut self) -> Result<DetectedColor, Tcs34727Error<B::Error>> {
        let raw = self.raw()?;
        Ok(classify(raw))
    }
}

/// A channel dominates when it strictly exceeds both others.
fn classify(raw: RawColor) -> DetectedColor {
    if raw.clear < CLEAR_FLOOR {
        return DetectedColor::None;
    }
    if raw.red > raw.green && raw.red > raw.blue {
        DetectedColor::Red
    } else if raw.green > raw.red && raw.green > raw.blue {
        DetectedColor::Green
    } else if raw.blue > raw.red && raw.blue > raw.green {
        DetectedColor::Blue
    } else {
        DetectedColor::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{MockBus, TestDelay};

    fn detected_bus() -> MockBus {
        let mut bus = MockBus::new(ADDR);
        bus.regs[(CMD | reg::ID) as usize] = DEVICE_ID;
        bus
    }

    fn store_sample(bus: &mut MockBus, raw: RawColor) {
        let base = (CMD_AUTO_INC | reg::CDATAL) as usize;
        bus.regs[base..base + 2].copy_from_slice(&raw.clear.to_le_bytes());
        bus.regs[base + 2..base + 4].copy_from_slice(&raw.red.to_le_bytes());
        bus.regs[base + 4..base + 6].copy_from_slice(&raw.green.to_le_bytes());
        bus.regs[base + 6..base + 8].copy_from_slice(&raw.blue.to_le_bytes());
    }

    #[test]
    fn test_init_sequence_and_settle_delays() {
        let mut delay = TestDelay::default();
        let mut sensor = Tcs34727::new(detected_bus());
        sensor.init(&mut delay).unwrap();

        let bus = sensor.release();
        assert_eq!(
            bus.writes.as_slice(),
            &[
                (CMD | reg::ATIME, ATIME_2_4MS),
                (CMD | reg::CONTROL, GAIN_1X),
                (CMD | reg::ENABLE, ENABLE_PON),
                (CMD | reg::ENABLE, ENABLE_PON | ENABLE_AEN),
            ]
        );
        assert_eq!(delay.total_ms, 2 * SETTLE_MS);
    }

    #[test]
    fn test_init_rejects_unknown_identity() {
        let mut bus = MockBus::new(ADDR);
        bus.regs[(CMD | reg::ID) as usize] = 0x11;
        let mut delay = TestDelay::default();
        let mut sensor = Tcs34727::new(bus);

        assert_eq!(
            sensor.init(&mut delay),
            Err(Tcs34727Error::UnknownDevice(0x11))
        );
        assert!(sensor.release().writes.is_empty());
    }

    #[test]
    fn test_raw_decodes_little_endian_channels() {
        let sample = RawColor {
            clear: 0x0201,
            red: 0x0403,
            green: 0x0605,
            blue: 0x0807,
        };
        let mut bus = detected_bus();
        store_sample(&mut bus, sample);
        let mut sensor = Tcs34727::new(bus);

        assert_eq!(sensor.raw().unwrap(), sample);
    }

    #[test]
    fn test_rgb_normalizes_against_clear() {
        let mut bus = detected_bus();
        store_sample(
            &mut bus,
            RawColor {
                clear: 1000,
                red: 1000,
                green: 500,
                blue: 0,
            },
        );
        let mut sensor = Tcs34727::new(bus);

        assert_eq!(sensor.rgb().unwrap(), (255, 127, 0));
    }

    #[test]
    fn test_rgb_dark_scene_is_black() {
        let mut bus = detected_bus();
        store_sample(
            &mut bus,
            RawColor {
                clear: 5,
                red: 5,
                green: 5,
                blue: 5,
            },
        );
        let mut sensor = Tcs34727::new(bus);

        assert_eq!(sensor.rgb().unwrap(), (0, 0, 0));
    }

    #[test]
    fn test_classification() {
        let base = RawColor {
            clear: 500,
            red: 100,
            green: 100,
            blue: 100,
        };
        assert_eq!(classify(RawColor { red: 300, ..base }), DetectedColor::Red);
        assert_eq!(
            classify(RawColor { green: 300, ..base }),
            DetectedColor::Green
        );
        assert_eq!(classify(RawColor { blue: 300, ..base }), DetectedColor::Blue);
        // Tie: nothing dominates
        assert_eq!(classify(base), DetectedColor::None);
        // Too dark to judge even with a dominant channel
        assert_eq!(
            classify(RawColor {
                clear: 2,
                red: 300,
                ..base
            }),
            DetectedColor::None
        );
    }
}
