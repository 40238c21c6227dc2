//! Control primitives: the temperature value, the binary fan state, and
//! the hysteresis decision.

pub mod hysteresis;

use core::fmt;

/// A temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Temperature(f64);

impl Temperature {
    pub const fn from_celsius(celsius: f64) -> Self {
        Self(celsius)
    }

    /// Convert a raw sysfs reading (millidegrees Celsius).
    pub fn from_millidegrees(raw: i64) -> Self {
        Self(raw as f64 / 1000.0)
    }

    pub const fn celsius(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\u{00b0}C", self.0)
    }
}

/// Level of the fan output.  The control loop starts in `Off`, matching the
/// level the line is requested with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FanState {
    #[default]
    Off,
    On,
}

impl FanState {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for FanState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for FanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}
