//! GPIO character-device output line.
//!
//! Acquisition happens in three steps, each of which can fail on its own:
//! open the chip, look up the line, request it as an output.  The chip and
//! line handle are owned fields, so a failure at any step drops only what
//! was already acquired, and a successful [`GpioLine`] releases the line
//! before the chip when it goes out of scope.
//!
//! [`GpioLine`] implements [`embedded_hal::digital::OutputPin`], which is
//! all the [`FanDriver`](super::fan::FanDriver) needs.

use std::path::{Path, PathBuf};

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use log::debug;

use crate::error::ActuatorError;

const CHIP_HINT: &str = "Make sure the chip name is correct and you have appropriate permissions (try running with 'sudo')";
const LINE_HINT: &str = "Make sure the line number exists on this chip";
const REQUEST_HINT: &str = "Make sure the GPIO line is not in use and you have appropriate permissions (try running with 'sudo')";

/// Which line to claim and under what consumer tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIdentity {
    /// Chip name (`gpiochip1`) or device path (`/dev/gpiochip1`).
    pub chip: String,
    pub line: u32,
    pub consumer: String,
}

impl LineIdentity {
    /// Bare names resolve under `/dev`.
    pub fn chip_path(&self) -> PathBuf {
        if self.chip.contains('/') {
            PathBuf::from(&self.chip)
        } else {
            Path::new("/dev").join(&self.chip)
        }
    }
}

/// A claimed output line.
///
/// Dropping it releases the line, then closes the chip. That ordering comes
/// from the field order below (Rust drops fields in declaration order); the
/// `Drop` impl only logs. Drive the line low before dropping, as
/// [`FanDriver::release`](super::fan::FanDriver::release) does.
pub struct GpioLine {
    // Field order is drop order: line handle first, then the chip.
    handle: LineHandle,
    _chip: Chip,
    identity: LineIdentity,
}

impl GpioLine {
    /// Claim the line as an output with initial level low.
    pub fn acquire(identity: &LineIdentity) -> Result<Self, ActuatorError> {
        let path = identity.chip_path();

        let mut chip = Chip::new(&path).map_err(|source| ActuatorError::Acquire {
            resource: format!("GPIO chip '{}'", path.display()),
            hint: CHIP_HINT,
            source,
        })?;
        debug!("gpio: opened chip {}", path.display());

        let line = chip
            .get_line(identity.line)
            .map_err(|source| ActuatorError::Acquire {
                resource: format!("GPIO line {} on chip '{}'", identity.line, path.display()),
                hint: LINE_HINT,
                source,
            })?;

        let handle = line
            .request(LineRequestFlags::OUTPUT, 0, &identity.consumer)
            .map_err(|source| ActuatorError::Acquire {
                resource: format!(
                    "GPIO line {} on chip '{}' as output",
                    identity.line,
                    path.display()
                ),
                hint: REQUEST_HINT,
                source,
            })?;
        debug!(
            "gpio: line {} requested as output for '{}', initial level 0",
            identity.line, identity.consumer
        );

        Ok(Self {
            handle,
            _chip: chip,
            identity: identity.clone(),
        })
    }

    pub fn identity(&self) -> &LineIdentity {
        &self.identity
    }
}

// Logging only; the kernel resources go with `handle` and `_chip`.
impl Drop for GpioLine {
    fn drop(&mut self) {
        debug!(
            "gpio: releasing line {} and closing chip '{}'",
            self.identity.line, self.identity.chip
        );
    }
}

/// Level write failure from the character device.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct GpioWriteError(#[from] gpio_cdev::errors::Error);

impl embedded_hal::digital::Error for GpioWriteError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for GpioLine {
    type Error = GpioWriteError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(self.handle.set_value(0)?)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(self.handle.set_value(1)?)
    }
}
