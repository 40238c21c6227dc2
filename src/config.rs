//! Controller configuration parameters
//!
//! Every tunable of the fan controller in one immutable value, validated
//! once at startup.  Values can be overridden by a JSON file and then by
//! `FANCTL_*` environment variables (see
//! [`JsonConfigAdapter`](crate::adapters::config_file::JsonConfigAdapter)).

use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::control::hysteresis::Thresholds;
use crate::drivers::gpio::LineIdentity;
use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    // --- Sensor ---
    /// Thermal-zone file holding millidegrees Celsius
    pub sensor_path: PathBuf,

    // --- Fan output ---
    /// GPIO chip name (`gpiochip1`) or device path (`/dev/gpiochip1`)
    pub chip: String,
    /// Line offset on the chip
    pub line: u32,
    /// Consumer tag shown by `gpioinfo` for the claimed line
    pub consumer: String,

    // --- Thresholds ---
    /// Temperature (Celsius) at or above which the fan turns on
    pub turn_on_at_c: f64,
    /// Temperature (Celsius) at or below which the fan turns off
    pub turn_off_at_c: f64,

    // --- Timing ---
    /// Delay between sampling cycles (milliseconds)
    pub polling_interval_ms: u64,

    // --- Logging ---
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sensor_path: PathBuf::from("/sys/class/thermal/thermal_zone2/temp"),

            chip: "gpiochip1".into(),
            line: 78,
            consumer: "cpu_temp_fan_control".into(),

            turn_on_at_c: 56.0,
            turn_off_at_c: 55.5,

            polling_interval_ms: 2000,

            // Errors only; `info` adds fan transitions, `debug` every sample.
            log_level: "warn".into(),
        }
    }
}

/// Environment variables recognised by [`ControllerConfig::apply_overrides`].
pub const ENV_SENSOR_PATH: &str = "FANCTL_SENSOR_PATH";
pub const ENV_CHIP: &str = "FANCTL_CHIP";
pub const ENV_LINE: &str = "FANCTL_LINE";
pub const ENV_CONSUMER: &str = "FANCTL_CONSUMER";
pub const ENV_TURN_ON_AT: &str = "FANCTL_TURN_ON_AT";
pub const ENV_TURN_OFF_AT: &str = "FANCTL_TURN_OFF_AT";
pub const ENV_POLL_MS: &str = "FANCTL_POLL_MS";
pub const ENV_LOG_LEVEL: &str = "FANCTL_LOG_LEVEL";

impl ControllerConfig {
    /// Reject configurations the controller cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed("sensor_path must not be empty"));
        }
        if self.chip.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("chip must not be empty"));
        }
        if self.consumer.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("consumer must not be empty"));
        }
        if !self.turn_on_at_c.is_finite() || !self.turn_off_at_c.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds must be finite"));
        }
        if self.turn_on_at_c <= self.turn_off_at_c {
            return Err(ConfigError::ValidationFailed(
                "turn_on_at_c must be above turn_off_at_c",
            ));
        }
        if self.polling_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "polling_interval_ms must be greater than zero",
            ));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::ValidationFailed(
                "log_level must be one of off, error, warn, info, debug, trace",
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        Thresholds::new(self.turn_on_at_c, self.turn_off_at_c)
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn line_identity(&self) -> LineIdentity {
        LineIdentity {
            chip: self.chip.clone(),
            line: self.line,
            consumer: self.consumer.clone(),
        }
    }

    /// Overwrite fields from `lookup` (normally the process environment).
    /// Unset variables leave the field alone.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_SENSOR_PATH) {
            self.sensor_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_CHIP) {
            self.chip = v;
        }
        if let Some(v) = lookup(ENV_LINE) {
            self.line = parse_override(ENV_LINE, &v)?;
        }
        if let Some(v) = lookup(ENV_CONSUMER) {
            self.consumer = v;
        }
        if let Some(v) = lookup(ENV_TURN_ON_AT) {
            self.turn_on_at_c = parse_override(ENV_TURN_ON_AT, &v)?;
        }
        if let Some(v) = lookup(ENV_TURN_OFF_AT) {
            self.turn_off_at_c = parse_override(ENV_TURN_OFF_AT, &v)?;
        }
        if let Some(v) = lookup(ENV_POLL_MS) {
            self.polling_interval_ms = parse_override(ENV_POLL_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            self.log_level = v;
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
        var,
        value: value.to_owned(),
    })
}
