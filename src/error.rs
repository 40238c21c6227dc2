//! Unified error types for the fan controller.
//!
//! One enum per subsystem, all convertible into the top-level [`Error`] so
//! startup code can funnel everything through a single `?` chain.  Only
//! [`ActuatorError::Acquire`] and [`ConfigError`] are fatal; sensor and
//! write failures are reported by the control loop and the next cycle
//! tries again.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::control::FanState;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    #[error("sensor: {0}")]
    Sensor(#[from] SensorError),
    #[error("actuator: {0}")]
    Actuator(#[from] ActuatorError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SensorError {
    /// The sensor interface could not be read (missing, permissions, I/O).
    #[error(
        "could not read temperature from {}: {source}. Make sure the path is correct and you have read permissions",
        path.display()
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The content is not a base-10 millidegree integer.
    #[error("could not parse temperature value '{raw}': {reason}")]
    Parse { raw: String, reason: String },
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ActuatorError {
    /// Chip open, line lookup, or output request failed at startup.
    #[error("could not acquire {resource}: {source}. {hint}")]
    Acquire {
        resource: String,
        hint: &'static str,
        #[source]
        source: gpio_cdev::errors::Error,
    },
    /// Driving the output level failed.
    #[error("could not set fan {target}: {detail}")]
    Write { target: FanState, detail: String },
    /// The output has already been handed back.
    #[error("fan output already released")]
    Released,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// An environment override could not be parsed for its field type.
    #[error("invalid value '{value}' for {var}")]
    InvalidOverride { var: &'static str, value: String },
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
