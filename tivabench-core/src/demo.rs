//! Demo mode selection
//!
//! The rig runs exactly one demo loop, chosen at startup. A runtime enum
//! rather than compile-time flags, so a button can cycle through modes
//! without a rebuild.

/// Which demo loop the firmware runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoMode {
    /// Heartbeat LED toggle, exercises only the delay primitive
    #[default]
    Delay,
    /// Scan the assignable address range and log responding devices
    BusProbe,
    /// Stream scaled IMU samples and tilt angles
    Imu,
    /// Stream RGB readings, mirror the detected color on the status LED
    ColorSensor,
    /// Sweep the servo through its calibration positions
    Servo,
    /// Print a banner on the character LCD
    Lcd,
    /// Tilt drives the servo, color drives the LED, LCD shows both
    FullSystem,
}

impl DemoMode {
    /// Next mode in cycle order; wraps back to the first.
    pub fn next(self) -> Self {
        match self {
            DemoMode::Delay => DemoMode::BusProbe,
            DemoMode::BusProbe => DemoMode::Imu,
            DemoMode::Imu => DemoMode::ColorSensor,
            DemoMode::ColorSensor => DemoMode::Servo,
            DemoMode::Servo => DemoMode::Lcd,
            DemoMode::Lcd => DemoMode::FullSystem,
            DemoMode::FullSystem => DemoMode::Delay,
        }
    }

    /// Short name for logs and the LCD.
    pub fn label(self) -> &'static str {
        match self {
            DemoMode::Delay => "delay",
            DemoMode::BusProbe => "bus probe",
            DemoMode::Imu => "imu",
            DemoMode::ColorSensor => "color",
            DemoMode::Servo => "servo",
            DemoMode::Lcd => "lcd",
            DemoMode::FullSystem => "full system",
        }
    }

    /// Whether the demo needs the two-wire bus brought up.
    pub fn uses_bus(self) -> bool {
        !matches!(self, DemoMode::Delay | DemoMode::Servo)
    }
}
