//! Actuator drivers: the GPIO output line and the fan on top of it.

pub mod fan;
pub mod gpio;
