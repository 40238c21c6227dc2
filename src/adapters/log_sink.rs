//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`AppEvent`] as a single
//! `TAG | key=value` line through the `log` facade.  Levels are chosen so
//! the default `warn` filter shows only failures; `info` adds fan
//! transitions and lifecycle, `debug` adds every sample.

use log::{debug, error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::FanState;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                turn_on_at,
                turn_off_at,
                interval,
            } => {
                info!(
                    "START | fan on at {:.1}\u{00b0}C, off at {:.1}\u{00b0}C | polling every {:?}",
                    turn_on_at.celsius(),
                    turn_off_at.celsius(),
                    interval,
                );
            }
            AppEvent::Sample { temperature, state } => {
                debug!("SAMPLE | T={} | fan={}", temperature, state);
            }
            AppEvent::FanSwitched {
                from,
                to,
                temperature,
                threshold,
            } => {
                let cmp = if *to == FanState::On { ">=" } else { "<=" };
                info!(
                    "FAN | {} -> {} | T={} ({} {:.1}\u{00b0}C)",
                    from,
                    to,
                    temperature,
                    cmp,
                    threshold.celsius(),
                );
            }
            AppEvent::ReadFailed { error: e } => {
                error!("SENSOR | {}", e);
            }
            AppEvent::WriteFailed { target, error: e } => {
                error!("FAN | could not switch {}: {}", target, e);
            }
            AppEvent::Stopped { state } => {
                info!("STOP | last state={}", state);
            }
        }
    }
}
