//! Hobby servo on a PWM channel
//!
//! Angles are commanded in degrees over a symmetric range and mapped
//! linearly onto the channel's pulse width. The endpoints default to the
//! common 1 ms / 2.5 ms band but can be tuned per servo.

use tivabench_hal::PwmChannel;

/// Commandable range in degrees, either side of center
pub const ANGLE_MAX: i16 = 90;

/// Hobby servo over a PWM channel
pub struct Servo<P> {
    pwm: P,
    min_ticks: u32,
    max_ticks: u32,
}

impl<P: PwmChannel> Servo<P> {
    /// Servo with the default 1/16 .. 1/8 duty endpoints for a 20 ms frame.
    pub fn new(pwm: P) -> Self {
        let period = pwm.period_ticks();
        Self::with_pulse_range(pwm, period / 40, period / 8)
    }

    /// Servo with explicit pulse endpoints, for units that need trimming.
    pub fn with_pulse_range(pwm: P, min_ticks: u32, max_ticks: u32) -> Self {
        Self {
            pwm,
            min_ticks,
            max_ticks,
        }
    }

    pub fn release(self) -> P {
        self.pwm
    }

    /// Drive to an angle in degrees. Out-of-range commands clamp to the
    /// mechanical endpoints instead of wrapping.
    pub fn drive(&mut self, angle: i16) {
        let angle = angle.clamp(-ANGLE_MAX, ANGLE_MAX);
        let span = (self.max_ticks - self.min_ticks) as i32;
        let offset = (angle as i32 + ANGLE_MAX as i32) * span / (2 * ANGLE_MAX as i32);
        self.pwm.set_pulse_ticks(self.min_ticks + offset as u32);
    }

    /// Center the horn.
    pub fn center(&mut self) {
        self.drive(0);
    }
}
