//! On/off cooling fan driver.
//!
//! Wraps any [`OutputPin`] (a GPIO character-device line in production, a
//! mock pin in tests) and tracks the last level that was written
//! successfully.
//!
//! ## Safety contract
//!
//! The fan is left **off** whenever the driver lets go of its pin.
//! [`FanDriver::release`] writes low before dropping the pin and runs at
//! most once; `Drop` calls it, so early returns and panics still switch the
//! fan off.  A failed final write is logged and otherwise ignored since the
//! process is exiting anyway.

use core::fmt;

use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::app::ports::Actuator;
use crate::control::FanState;
use crate::error::ActuatorError;

pub struct FanDriver<P>
where
    P: OutputPin,
    P::Error: fmt::Display,
{
    pin: Option<P>,
    state: FanState,
}

impl<P> FanDriver<P>
where
    P: OutputPin,
    P::Error: fmt::Display,
{
    /// Take ownership of `pin` and drive it low.
    pub fn new(mut pin: P) -> Result<Self, ActuatorError> {
        pin.set_low().map_err(|e| write_error(FanState::Off, &e))?;
        Ok(Self {
            pin: Some(pin),
            state: FanState::Off,
        })
    }

    pub fn state(&self) -> FanState {
        self.state
    }

    pub fn is_released(&self) -> bool {
        self.pin.is_none()
    }

    /// Switch the fan off (best effort) and hand the pin back to its owner's
    /// drop.  Later calls do nothing.
    pub fn release(&mut self) {
        let Some(mut pin) = self.pin.take() else {
            return;
        };

        match pin.set_low() {
            Ok(()) => self.state = FanState::Off,
            Err(e) => warn!("could not switch fan off before releasing the line: {e}"),
        }
        drop(pin);
        debug!("fan output released (last state {})", self.state);
    }
}

impl<P> Actuator for FanDriver<P>
where
    P: OutputPin,
    P::Error: fmt::Display,
{
    fn set(&mut self, state: FanState) -> Result<(), ActuatorError> {
        let pin = self.pin.as_mut().ok_or(ActuatorError::Released)?;
        let written = match state {
            FanState::On => pin.set_high(),
            FanState::Off => pin.set_low(),
        };
        written.map_err(|e| write_error(state, &e))?;
        self.state = state;
        Ok(())
    }
}

impl<P> Drop for FanDriver<P>
where
    P: OutputPin,
    P::Error: fmt::Display,
{
    fn drop(&mut self) {
        self.release();
    }
}

fn write_error(target: FanState, e: &impl fmt::Display) -> ActuatorError {
    ActuatorError::Write {
        target,
        detail: e.to_string(),
    }
}
