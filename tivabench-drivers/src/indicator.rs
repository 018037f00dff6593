//! Three-pin RGB indicator LED

use tivabench_hal::OutputPin;

use crate::color::DetectedColor;

/// Discrete RGB LED on three GPIO pins, active high.
pub struct RgbLed<P> {
    red: P,
    green: P,
    blue: P,
}

impl<P: OutputPin> RgbLed<P> {
    pub fn new(red: P, green: P, blue: P) -> Self {
        Self { red, green, blue }
    }

    /// Light the channel matching a classification; `None` goes dark.
    pub fn show(&mut self, color: DetectedColor) {
        self.red.set_state(color == DetectedColor::Red);
        self.green.set_state(color == DetectedColor::Green);
        self.blue.set_state(color == DetectedColor::Blue);
    }

    pub fn off(&mut self) {
        self.show(DetectedColor::None);
    }
}
