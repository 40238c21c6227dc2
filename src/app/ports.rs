//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensor, fan output, event sink, config source)
//! implement these traits.  The [`ControlLoop`](super::service::ControlLoop)
//! takes them as generics at call sites, so the domain core never touches
//! sysfs or GPIO directly and every test can substitute a mock.

use crate::config::ControllerConfig;
use crate::control::{FanState, Temperature};

pub use crate::error::{ActuatorError, ConfigError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Synchronous temperature provider.
pub trait TemperatureSource {
    /// Take a fresh reading.  Implementations must not cache or retry.
    fn read(&mut self) -> Result<Temperature, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Synchronous binary output.
pub trait Actuator {
    /// Drive the output to `state`.
    ///
    /// The control loop owns the recorded state; on error it keeps the
    /// previous one and re-derives the transition next cycle.
    fn set(&mut self, state: FanState) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: environment → domain)
// ───────────────────────────────────────────────────────────────

/// Loads controller configuration.
///
/// Implementations MUST return a validated config; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], never clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<ControllerConfig, ConfigError>;
}
