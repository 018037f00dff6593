//! LaunchPad bring-up: clock gating, pin muxing, board peripherals
//!
//! The rig runs from the 16 MHz precision internal oscillator. Pinout:
//! PB2/PB3 are the two-wire bus (SDA open-drain), PC4 carries the servo
//! pulse from wide timer 0, and port F has the usual LaunchPad LEDs
//! (PF1/PF2/PF3) and switches (PF4, PF0 behind the commit lock).

use tivabench_core::bus::{BusMaster, STANDARD_HZ};
use tivabench_drivers::indicator::RgbLed;
use tivabench_drivers::servo::Servo;
use tivabench_hal::{DelayMs, InputPin, OutputPin, PwmChannel};
use tm4c123x::Peripherals;

use crate::bus::I2cBlock;

pub const SYSTEM_HZ: u32 = 16_000_000;

/// 20 ms servo frame at the system tick rate
const SERVO_PERIOD_TICKS: u32 = SYSTEM_HZ / 50;
/// 0.5 ms and 2.5 ms pulse endpoints
const SERVO_MIN_TICKS: u32 = SYSTEM_HZ / 2000;
const SERVO_MAX_TICKS: u32 = SYSTEM_HZ / 400;

/// GPIO commit unlock key
const GPIO_LOCK_KEY: u32 = 0x4C4F_434B;

mod pins {
    /// PB2 clock, PB3 data
    pub const I2C_SCL: u32 = 1 << 2;
    pub const I2C_SDA: u32 = 1 << 3;
    /// PC4, WT0CCP0
    pub const SERVO: u32 = 1 << 4;

    pub const LED_RED: u8 = 1 << 1;
    pub const LED_BLUE: u8 = 1 << 2;
    pub const LED_GREEN: u8 = 1 << 3;
    pub const SW1: u8 = 1 << 4;
    pub const SW2: u8 = 1 << 0;
}

/// One port F LED, active high.
pub struct LedPin {
    mask: u8,
}

impl OutputPin for LedPin {
    fn set_high(&mut self) {
        let port = unsafe { &*tm4c123x::GPIO_PORTF::ptr() };
        port.data
            .modify(|r, w| unsafe { w.bits(r.bits() | self.mask as u32) });
    }

    fn set_low(&mut self) {
        let port = unsafe { &*tm4c123x::GPIO_PORTF::ptr() };
        port.data
            .modify(|r, w| unsafe { w.bits(r.bits() & !(self.mask as u32)) });
    }

    fn is_set_high(&self) -> bool {
        let port = unsafe { &*tm4c123x::GPIO_PORTF::ptr() };
        port.data.read().bits() & self.mask as u32 != 0
    }
}

/// One port F switch, active low with the internal pull-up.
pub struct ButtonPin {
    mask: u8,
}

impl ButtonPin {
    /// Pressed means the pin reads low.
    pub fn is_pressed(&self) -> bool {
        self.is_low()
    }
}

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        let port = unsafe { &*tm4c123x::GPIO_PORTF::ptr() };
        port.data.read().bits() & self.mask as u32 != 0
    }
}

/// Servo pulse generator on wide timer 0 in 32-bit split PWM mode.
///
/// The timer counts down from the period and drives the pin low at the
/// match, so the match register is period-1-pulse.
pub struct ServoPwm {
    period: u32,
}

impl PwmChannel for ServoPwm {
    fn period_ticks(&self) -> u32 {
        self.period
    }

    fn set_pulse_ticks(&mut self, ticks: u32) {
        let timer = unsafe { &*tm4c123x::WTIMER0::ptr() };
        let pulse = ticks.min(self.period - 1);
        timer
            .tamatchr
            .write(|w| unsafe { w.bits(self.period - 1 - pulse) });
    }
}

/// Calibrated busy-wait, good enough for sensor settle times.
pub struct SpinDelay;

impl DelayMs for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        cortex_m::asm::delay(ms.saturating_mul(SYSTEM_HZ / 1000));
    }
}

/// Everything the demo loops need, fully brought up.
pub struct Board {
    pub bus: BusMaster<I2cBlock>,
    pub rgb: RgbLed<LedPin>,
    pub sw1: ButtonPin,
    pub sw2: ButtonPin,
    pub servo: Servo<ServoPwm>,
    pub delay: SpinDelay,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let sysctl = p.SYSCTL;

        // Gate clocks to ports B, C, F, the I2C0 block and wide timer 0,
        // then wait for them to report ready.
        sysctl
            .rcgcgpio
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 1) | (1 << 2) | (1 << 5)) });
        sysctl.rcgci2c.modify(|r, w| unsafe { w.bits(r.bits() | 1) });
        sysctl
            .rcgcwtimer
            .modify(|r, w| unsafe { w.bits(r.bits() | 1) });
        while sysctl.prgpio.read().bits() & ((1 << 1) | (1 << 2) | (1 << 5))
            != ((1 << 1) | (1 << 2) | (1 << 5))
        {}
        while sysctl.pri2c.read().bits() & 1 == 0 {}
        while sysctl.prwtimer.read().bits() & 1 == 0 {}

        // Port B: alternate function for the bus pins, open-drain data line.
        let portb = p.GPIO_PORTB;
        portb
            .afsel
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::I2C_SCL | pins::I2C_SDA) });
        portb
            .odr
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::I2C_SDA) });
        portb
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::I2C_SCL | pins::I2C_SDA) });
        portb
            .pctl
            .modify(|r, w| unsafe { w.bits(r.bits() | 0x0000_3300) });

        // Port C: route WT0CCP0 to the servo header.
        let portc = p.GPIO_PORTC;
        portc
            .afsel
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::SERVO) });
        portc
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::SERVO) });
        portc
            .pctl
            .modify(|r, w| unsafe { w.bits(r.bits() | 0x0007_0000) });

        // Port F: PF0 sits behind the commit lock. LEDs out, switches
        // pulled up.
        let portf = p.GPIO_PORTF;
        portf.lock.write(|w| unsafe { w.bits(GPIO_LOCK_KEY) });
        portf
            .cr
            .modify(|r, w| unsafe { w.bits(r.bits() | pins::SW2 as u32) });
        let leds = (pins::LED_RED | pins::LED_BLUE | pins::LED_GREEN) as u32;
        let switches = (pins::SW1 | pins::SW2) as u32;
        portf.dir.modify(|r, w| unsafe { w.bits(r.bits() | leds) });
        portf
            .pur
            .modify(|r, w| unsafe { w.bits(r.bits() | switches) });
        portf
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() | leds | switches) });

        // Wide timer 0A: 32-bit split, periodic count-down PWM.
        let wtimer = p.WTIMER0;
        wtimer.ctl.modify(|r, w| unsafe { w.bits(r.bits() & !1) });
        wtimer.cfg.write(|w| unsafe { w.bits(0x4) });
        // TAAMS=1 (PWM), TAMR=periodic
        wtimer.tamr.write(|w| unsafe { w.bits(0x0A) });
        wtimer
            .tailr
            .write(|w| unsafe { w.bits(SERVO_PERIOD_TICKS - 1) });
        // Park the output at the center pulse before enabling the timer.
        let center = (SERVO_MIN_TICKS + SERVO_MAX_TICKS) / 2;
        wtimer
            .tamatchr
            .write(|w| unsafe { w.bits(SERVO_PERIOD_TICKS - 1 - center) });
        wtimer.ctl.modify(|r, w| unsafe { w.bits(r.bits() | 1) });
        let servo = Servo::with_pulse_range(
            ServoPwm {
                period: SERVO_PERIOD_TICKS,
            },
            SERVO_MIN_TICKS,
            SERVO_MAX_TICKS,
        );

        let mut bus = BusMaster::new(I2cBlock::new(p.I2C0));
        bus.set_clock(SYSTEM_HZ, STANDARD_HZ);

        Board {
            bus,
            rgb: RgbLed::new(
                LedPin {
                    mask: pins::LED_RED,
                },
                LedPin {
                    mask: pins::LED_GREEN,
                },
                LedPin {
                    mask: pins::LED_BLUE,
                },
            ),
            sw1: ButtonPin { mask: pins::SW1 },
            sw2: ButtonPin { mask: pins::SW2 },
            servo,
            delay: SpinDelay,
        }
    }
}
