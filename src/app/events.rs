//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use std::time::Duration;

use crate::control::{FanState, Temperature};

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to take its first sample.
    Started {
        turn_on_at: Temperature,
        turn_off_at: Temperature,
        interval: Duration,
    },

    /// A reading was taken; carries the state after the cycle.
    Sample {
        temperature: Temperature,
        state: FanState,
    },

    /// The fan output changed level.
    FanSwitched {
        from: FanState,
        to: FanState,
        temperature: Temperature,
        /// The threshold that was crossed.
        threshold: Temperature,
    },

    /// The sensor could not be read or parsed; the cycle was skipped.
    ReadFailed { error: String },

    /// A due transition could not be written; state kept for retry.
    WriteFailed { target: FanState, error: String },

    /// The loop has exited; carries the last recorded state.
    Stopped { state: FanState },
}
