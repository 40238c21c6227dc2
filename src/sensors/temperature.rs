//! Thermal-zone temperature sensor (Linux sysfs).
//!
//! The kernel exposes each thermal zone as a text file holding a single
//! integer in millidegrees Celsius, e.g. `/sys/class/thermal/thermal_zone2/temp`
//! containing `"55000\n"`.  Every [`read`](TemperatureSource::read) opens
//! and reads the file afresh; there is no caching and no retry.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::ports::TemperatureSource;
use crate::control::Temperature;
use crate::error::SensorError;

pub struct SysfsTemperatureSensor {
    path: PathBuf,
}

impl SysfsTemperatureSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemperatureSource for SysfsTemperatureSensor {
    fn read(&mut self) -> Result<Temperature, SensorError> {
        let bytes = fs::read(&self.path).map_err(|source| SensorError::Read {
            path: self.path.clone(),
            source,
        })?;
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| parse_error(String::from_utf8_lossy(&bytes).trim(), "not ASCII text"))?;
        parse_millidegrees(content)
    }
}

/// Parse a millidegree reading: optional surrounding whitespace, optional
/// leading `-`, ASCII digits.
pub fn parse_millidegrees(raw: &str) -> Result<Temperature, SensorError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(parse_error(trimmed, "no digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error(trimmed, "expected ASCII digits with optional leading '-'"));
    }

    let millidegrees: i64 = trimmed
        .parse()
        .map_err(|e: std::num::ParseIntError| parse_error(trimmed, &e.to_string()))?;
    Ok(Temperature::from_millidegrees(millidegrees))
}

fn parse_error(raw: &str, reason: &str) -> SensorError {
    SensorError::Parse {
        raw: raw.to_owned(),
        reason: reason.to_owned(),
    }
}
