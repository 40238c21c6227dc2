//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the thresholds, the polling interval, and the
//! single recorded [`FanState`].  All I/O flows through port traits
//! injected at call sites, making the loop testable with mock adapters.
//!
//! ```text
//!  TemperatureSource ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                        │     ControlLoop       │
//!          Actuator  ◀── │  Thresholds · state   │
//!                        └──────────────────────┘
//! ```

use std::time::Duration;

use log::{info, warn};

use crate::config::ControllerConfig;
use crate::control::FanState;
use crate::control::hysteresis::Thresholds;
use crate::error::ConfigError;
use crate::shutdown::Shutdown;

use super::events::AppEvent;
use super::ports::{Actuator, EventSink, TemperatureSource};

/// What a single cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The sensor failed; nothing was decided or written.
    ReadFailed,
    /// No transition was due.
    Held(FanState),
    /// The output was switched.
    Switched { from: FanState, to: FanState },
    /// A transition was due but the write failed; state unchanged.
    WriteFailed { intended: FanState },
}

pub struct ControlLoop {
    thresholds: Thresholds,
    interval: Duration,
    state: FanState,
    cycles: u64,
}

impl ControlLoop {
    /// Start in `Off`, which is the level the fan line is requested with.
    pub fn new(thresholds: Thresholds, interval: Duration) -> Self {
        if thresholds.is_degenerate() {
            warn!(
                "turn-on and turn-off thresholds are both {}; there is no dead band",
                thresholds.turn_on_at()
            );
        }
        Self {
            thresholds,
            interval,
            state: FanState::Off,
            cycles: 0,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.thresholds()?, config.polling_interval()))
    }

    pub fn state(&self) -> FanState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Number of cycles run so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: read → decide → write on change.
    ///
    /// Sensor and write failures are reported through `sink` and never
    /// propagated; a failed write leaves the recorded state untouched so
    /// the next cycle re-derives and retries the same transition.
    pub fn tick(
        &mut self,
        sensor: &mut impl TemperatureSource,
        fan: &mut impl Actuator,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.cycles += 1;

        let temperature = match sensor.read() {
            Ok(t) => t,
            Err(e) => {
                sink.emit(&AppEvent::ReadFailed {
                    error: e.to_string(),
                });
                return TickOutcome::ReadFailed;
            }
        };

        let from = self.state;
        let to = self.thresholds.decide(temperature, from);

        let outcome = if to == from {
            TickOutcome::Held(from)
        } else {
            match fan.set(to) {
                Ok(()) => {
                    self.state = to;
                    sink.emit(&AppEvent::FanSwitched {
                        from,
                        to,
                        temperature,
                        threshold: self.thresholds.threshold_for(to),
                    });
                    TickOutcome::Switched { from, to }
                }
                Err(e) => {
                    sink.emit(&AppEvent::WriteFailed {
                        target: to,
                        error: e.to_string(),
                    });
                    TickOutcome::WriteFailed { intended: to }
                }
            }
        };

        sink.emit(&AppEvent::Sample {
            temperature,
            state: self.state,
        });
        outcome
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Cycle until `shutdown` is triggered, waiting one polling interval
    /// between cycles.  Returns the last recorded state.
    ///
    /// Releasing the fan output stays with the caller, which owns it.
    pub fn run(
        &mut self,
        sensor: &mut impl TemperatureSource,
        fan: &mut impl Actuator,
        sink: &mut impl EventSink,
        shutdown: &Shutdown,
    ) -> FanState {
        sink.emit(&AppEvent::Started {
            turn_on_at: self.thresholds.turn_on_at(),
            turn_off_at: self.thresholds.turn_off_at(),
            interval: self.interval,
        });

        while !shutdown.is_triggered() {
            self.tick(sensor, fan, sink);
            if shutdown.wait_timeout(self.interval) {
                break;
            }
        }

        info!("control loop stopped after {} cycles", self.cycles);
        sink.emit(&AppEvent::Stopped { state: self.state });
        self.state
    }
}
