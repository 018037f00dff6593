//! MPU6050 6-axis accelerometer/gyroscope
//!
//! Samples come out as big-endian signed 16-bit pairs, six bytes per burst
//! thanks to the device's register auto-increment. Scale factors depend on
//! the programmed full-scale range, which is read back from the config
//! registers rather than cached.

use micromath::F32Ext;
use tivabench_hal::RegisterBus;

/// Register map (subset used by this driver)
mod reg {
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Default device address (AD0 strapped low)
pub const ADDR_AD0_LOW: u8 = 0x68;
/// Device address with AD0 strapped high
pub const ADDR_AD0_HIGH: u8 = 0x69;

/// Fixed identity byte in WHO_AM_I
const DEVICE_ID: u8 = 0x68;

const PWR_DEVICE_RESET: u8 = 0x80;
const PWR_CLK_INTERNAL: u8 = 0x00;
/// Sample-rate divider for 1 kHz output
const SMPLRT_DIV_8: u8 = 0x07;
const DLPF_CFG_0: u8 = 0x00;
/// Full-scale selection lives in bits 4:3 of both config registers.
const FS_SEL_SHIFT: u8 = 3;
const FS_SEL_MASK: u8 = 0x03;

/// Accelerometer LSB per g for the four full-scale ranges
const ACCEL_LSB: [f32; 4] = [16384.0, 8192.0, 4096.0, 2048.0];
/// Gyroscope LSB per °/s for the four full-scale ranges
const GYRO_LSB: [f32; 4] = [131.0, 65.5, 32.8, 16.4];

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// MPU6050 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mpu6050Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// WHO_AM_I returned something other than 0x68; wrong or absent device
    UnknownDevice(u8),
}

impl<E> From<E> for Mpu6050Error<E> {
    fn from(e: E) -> Self {
        Mpu6050Error::Bus(e)
    }
}

/// Tilt angles derived from the accelerometer, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltAngles {
    /// Rotation about the X axis
    pub roll: f32,
    /// Rotation about the Y axis
    pub pitch: f32,
}

/// MPU6050 over the bus primitives
pub struct Mpu6050<B> {
    bus: B,
    addr: u8,
}

impl<B: RegisterBus> Mpu6050<B> {
    /// Driver for the default address (AD0 low).
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, ADDR_AD0_LOW)
    }

    /// Driver for a specific strap address.
    pub fn with_address(bus: B, addr: u8) -> Self {
        Self { bus, addr }
    }

    pub fn release(self) -> B {
        self.bus
    }

    /// Identity-check and configure the device at its defaults: 1 kHz
    /// sample rate, DLPF off, ±2 g, ±250 °/s.
    ///
    /// A failed identity check means the device is absent or miswired;
    /// callers should disable this sensor and carry on.
    pub fn init(&mut self) -> Result<(), Mpu6050Error<B::Error>> {
        let id = self.bus.read_reg(self.addr, reg::WHO_AM_I)?;
        if id != DEVICE_ID {
            return Err(Mpu6050Error::UnknownDevice(id));
        }

        self.bus.write_reg(self.addr, reg::PWR_MGMT_1, PWR_DEVICE_RESET)?;
        self.bus.write_reg(self.addr, reg::PWR_MGMT_1, PWR_CLK_INTERNAL)?;
        self.bus.write_reg(self.addr, reg::SMPLRT_DIV, SMPLRT_DIV_8)?;
        self.bus.write_reg(self.addr, reg::CONFIG, DLPF_CFG_0)?;
        self.bus.write_reg(self.addr, reg::ACCEL_CONFIG, 0)?;
        self.bus.write_reg(self.addr, reg::GYRO_CONFIG, 0)?;
        Ok(())
    }

    /// Raw accelerometer sample, one six-byte burst.
    pub fn accel_raw(&mut self) -> Result<[i16; 3], Mpu6050Error<B::Error>> {
        self.sample(reg::ACCEL_XOUT_H)
    }

    /// Raw gyroscope sample, one six-byte burst.
    pub fn gyro_raw(&mut self) -> Result<[i16; 3], Mpu6050Error<B::Error>> {
        self.sample(reg::GYRO_XOUT_H)
    }

    /// Accelerometer sample in g.
    pub fn accel_g(&mut self) -> Result<[f32; 3], Mpu6050Error<B::Error>> {
        let raw = self.accel_raw()?;
        let cfg = self.bus.read_reg(self.addr, reg::ACCEL_CONFIG)?;
        let lsb = ACCEL_LSB[fs_index(cfg)];
        Ok(raw.map(|v| v as f32 / lsb))
    }

    /// Gyroscope sample in °/s.
    pub fn gyro_dps(&mut self) -> Result<[f32; 3], Mpu6050Error<B::Error>> {
        let raw = self.gyro_raw()?;
        let cfg = self.bus.read_reg(self.addr, reg::GYRO_CONFIG)?;
        let lsb = GYRO_LSB[fs_index(cfg)];
        Ok(raw.map(|v| v as f32 / lsb))
    }

    /// Tilt angles from the gravity vector.
    pub fn tilt_angles(&mut self) -> Result<TiltAngles, Mpu6050Error<B::Error>> {
        let [ax, ay, az] = self.accel_g()?;
        let roll = ay.atan2(az) * RAD_TO_DEG;
        let pitch = (-ax).atan2((ay * ay + az * az).sqrt()) * RAD_TO_DEG;
        Ok(TiltAngles { roll, pitch })
    }

    fn sample(&mut self, start: u8) -> Result<[i16; 3], Mpu6050Error<B::Error>> {
        let mut raw = [0u8; 6];
        self.bus.read_regs(self.addr, start, &mut raw)?;
        Ok([
            i16::from_be_bytes([raw[0], raw[1]]),
            i16::from_be_bytes([raw[2], raw[3]]),
            i16::from_be_bytes([raw[4], raw[5]]),
        ])
    }
}

fn fs_index(cfg: u8) -> usize {
    ((cfg >> FS_SEL_SHIFT) & FS_SEL_MASK) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::MockBus;

    fn detected_bus() -> MockBus {
        let mut bus = MockBus::new(ADDR_AD0_LOW);
        bus.regs[reg::WHO_AM_I as usize] = DEVICE_ID;
        bus
    }

    #[test]
    fn test_init_configures_defaults() {
        let mut imu = Mpu6050::new(detected_bus());
        imu.init().unwrap();

        let bus = imu.release();
        assert_eq!(
            bus.writes.as_slice(),
            &[
                (reg::PWR_MGMT_1, PWR_DEVICE_RESET),
                (reg::PWR_MGMT_1, PWR_CLK_INTERNAL),
                (reg::SMPLRT_DIV, SMPLRT_DIV_8),
                (reg::CONFIG, DLPF_CFG_0),
                (reg::ACCEL_CONFIG, 0),
                (reg::GYRO_CONFIG, 0),
            ]
        );
    }

    #[test]
    fn test_init_rejects_unknown_identity() {
        let mut bus = MockBus::new(ADDR_AD0_LOW);
        bus.regs[reg::WHO_AM_I as usize] = 0x42;
        let mut imu = Mpu6050::new(bus);

        assert_eq!(imu.init(), Err(Mpu6050Error::UnknownDevice(0x42)));
        // No configuration writes after a failed identity check.
        assert!(imu.release().writes.is_empty());
    }

    #[test]
    fn test_absent_device_is_a_bus_error() {
        let mut bus = MockBus::new(ADDR_AD0_LOW);
        bus.fail = true;
        let mut imu = Mpu6050::new(bus);
        assert!(matches!(imu.init(), Err(Mpu6050Error::Bus(_))));
    }

    #[test]
    fn test_raw_samples_pair_big_endian() {
        let mut bus = detected_bus();
        bus.regs[reg::ACCEL_XOUT_H as usize..reg::ACCEL_XOUT_H as usize + 6]
            .copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        let mut imu = Mpu6050::new(bus);

        assert_eq!(imu.accel_raw().unwrap(), [0x0102, 0x0304, 0x0506]);
    }

    #[test]
    fn test_negative_samples() {
        let mut bus = detected_bus();
        // -1, -256, -32768
        bus.regs[reg::GYRO_XOUT_H as usize..reg::GYRO_XOUT_H as usize + 6]
            .copy_from_slice(&[0xFF, 0xFF, 0xFF, 0x00, 0x80, 0x00]);
        let mut imu = Mpu6050::new(bus);

        assert_eq!(imu.gyro_raw().unwrap(), [-1, -256, -32768]);
    }

    #[test]
    fn test_accel_scaling_tracks_full_scale_config() {
        let mut bus = detected_bus();
        // +1 g on Z at the ±2 g range
        bus.regs[0x3F] = 0x40; // 16384 = 0x4000
        bus.regs[0x40] = 0x00;
        let mut imu = Mpu6050::new(bus);

        let [x, y, z] = imu.accel_g().unwrap();
        assert_eq!((x, y), (0.0, 0.0));
        assert!((z - 1.0).abs() < 1e-6);

        // Same raw count at ±4 g reads as 2 g
        let mut bus = imu.release();
        bus.regs[reg::ACCEL_CONFIG as usize] = 1 << FS_SEL_SHIFT;
        let mut imu = Mpu6050::new(bus);
        let [_, _, z] = imu.accel_g().unwrap();
        assert!((z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_gyro_scaling() {
        let mut bus = detected_bus();
        // 131 LSB = 1 °/s at ±250 °/s
        bus.regs[reg::GYRO_XOUT_H as usize] = 0x00;
        bus.regs[reg::GYRO_XOUT_H as usize + 1] = 131;
        let mut imu = Mpu6050::new(bus);

        let [x, _, _] = imu.gyro_dps().unwrap();
        assert!((x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_tilt_angles_flat_and_on_edge() {
        // Flat: gravity straight down the Z axis
        let mut bus = detected_bus();
        bus.regs[0x3F] = 0x40;
        let mut imu = Mpu6050::new(bus);
        let flat = imu.tilt_angles().unwrap();
        assert!(flat.roll.abs() < 0.5);
        assert!(flat.pitch.abs() < 0.5);

        // On edge: gravity along Y gives 90° roll
        let mut bus = imu.release();
        bus.regs[0x3F] = 0x00;
        bus.regs[0x3D] = 0x40; // ACCEL_YOUT_H
        let mut imu = Mpu6050::new(bus);
        let edge = imu.tilt_angles().unwrap();
        assert!((edge.roll - 90.0).abs() < 0.5);
    }
}
