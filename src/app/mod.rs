//! Application core: the control loop and its port boundary, zero I/O.
//!
//! The loop talks to the sensor, the fan output, and the log only through
//! the **port traits** in [`ports`], so every rule here is testable without
//! a thermal zone or a GPIO chip.

pub mod events;
pub mod ports;
pub mod service;
