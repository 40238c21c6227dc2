//! Two-threshold on/off controller.
//!
//! The fan switches on at `turn_on_at` and only switches off again once the
//! temperature has fallen to `turn_off_at`.  Between the two (the dead band)
//! the current state is kept, which stops the output chattering around a
//! single set point.
//!
//! ```text
//!   ON  ───────────────┬──────────────▶
//!                      │      ▲
//!                      ▼      │
//!   OFF ◀──────────────┴──────┘
//!              turn_off_at  turn_on_at
//! ```

use crate::control::{FanState, Temperature};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    turn_on_at: Temperature,
    turn_off_at: Temperature,
}

impl Thresholds {
    /// Build a threshold pair.
    ///
    /// `turn_on_at == turn_off_at` is accepted: the dead band collapses to a
    /// single switching point and the controller behaves like a plain
    /// comparator (on at `>=`, off at `<=`, so it flips every cycle while the
    /// reading sits exactly on the point).  Startup validation in
    /// [`ControllerConfig`](crate::config::ControllerConfig) rejects it.
    pub fn new(turn_on_at: f64, turn_off_at: f64) -> Result<Self, ConfigError> {
        if !turn_on_at.is_finite() || !turn_off_at.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds must be finite"));
        }
        if turn_on_at < turn_off_at {
            return Err(ConfigError::ValidationFailed(
                "turn_on_at_c must not be below turn_off_at_c",
            ));
        }
        Ok(Self {
            turn_on_at: Temperature::from_celsius(turn_on_at),
            turn_off_at: Temperature::from_celsius(turn_off_at),
        })
    }

    pub fn turn_on_at(&self) -> Temperature {
        self.turn_on_at
    }

    pub fn turn_off_at(&self) -> Temperature {
        self.turn_off_at
    }

    /// True when there is no dead band.
    pub fn is_degenerate(&self) -> bool {
        self.turn_on_at == self.turn_off_at
    }

    /// The threshold that has to be crossed to reach `target`.
    pub fn threshold_for(&self, target: FanState) -> Temperature {
        match target {
            FanState::On => self.turn_on_at,
            FanState::Off => self.turn_off_at,
        }
    }

    /// Map a reading and the current state to the desired state.
    ///
    /// Pure.  With a non-empty dead band, feeding the output back in with the
    /// same reading returns the same output.
    pub fn decide(&self, temperature: Temperature, current: FanState) -> FanState {
        match current {
            FanState::Off if temperature >= self.turn_on_at => FanState::On,
            FanState::On if temperature <= self.turn_off_at => FanState::Off,
            _ => current,
        }
    }
}
