//! Sensor drivers.
//!
//! Each driver implements [`TemperatureSource`](crate::app::ports::TemperatureSource)
//! so the control loop never touches the underlying transport.

pub mod temperature;

pub use temperature::SysfsTemperatureSensor;
